//! Billing details collected by the payment form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Country preselected on the payment form.
pub const DEFAULT_COUNTRY: &str = "US";

/// A billing address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingAddress {
    /// Street address.
    pub line1: String,
    pub city: String,
    /// State or province.
    pub state: String,
    pub postal_code: String,
    /// Two-letter country code.
    pub country: String,
}

impl Default for BillingAddress {
    fn default() -> Self {
        Self {
            line1: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Cardholder details sent to the payment gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingDetails {
    /// Name on the card.
    pub name: String,
    pub email: String,
    pub address: BillingAddress,
}

impl BillingDetails {
    /// Create billing details.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: BillingAddress,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address,
        }
    }

    /// Check that every field is filled in and the email looks like one.
    ///
    /// The error names every missing field at once.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("address line 1", &self.address.line1),
            ("city", &self.address.city),
            ("state", &self.address.state),
            ("postal code", &self.address.postal_code),
            ("country", &self.address.country),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(CommerceError::InvalidBillingDetails(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(CommerceError::InvalidBillingDetails(format!(
                "malformed email: {}",
                self.email
            )));
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BillingDetails {
        BillingDetails::new(
            "Ada Lovelace",
            "ada@example.com",
            BillingAddress {
                line1: "12 Analytical Row".into(),
                city: "London".into(),
                state: "LDN".into(),
                postal_code: "N1 9GU".into(),
                country: "GB".into(),
            },
        )
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_default_country() {
        assert_eq!(BillingDetails::default().address.country, "US");
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut details = complete();
        details.name = "  ".into();
        details.address.city.clear();

        let err = details.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid billing details: missing name, city"
        );
    }

    #[test]
    fn test_malformed_email() {
        for email in ["ada", "@example.com", "ada@", "a@b@c"] {
            let mut details = complete();
            details.email = email.into();
            assert!(
                matches!(details.validate(), Err(CommerceError::InvalidBillingDetails(_))),
                "accepted {email}"
            );
        }
    }
}
