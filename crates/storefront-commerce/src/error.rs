//! Commerce error types.
//!
//! The cart ledger itself never fails; these errors cover catalog loading
//! and the checkout collaborators around it.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Billing details are incomplete or malformed.
    #[error("Invalid billing details: {0}")]
    InvalidBillingDetails(String),

    /// The payment method was declined by the gateway.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// The gateway could not be reached or did not answer.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Invalid sort option.
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file could not be parsed.
    #[error("Failed to parse catalog {path}: {message}")]
    CatalogParse { path: String, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Whether the user can simply resubmit after this error.
    ///
    /// A retryable failure never touches the cart.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CommerceError::PaymentDeclined(_)
                | CommerceError::PaymentFailed(_)
                | CommerceError::InvalidBillingDetails(_)
        )
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
