//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where an OrderId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderId);
define_id!(PaymentIntentId);
define_id!(PaymentMethodId);

impl OrderId {
    /// Order number derived from the creation time, e.g. `ORD-1718000000000`.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("ORD-{}", millis))
    }
}

impl PaymentIntentId {
    /// Generate a new intent ID, e.g. `pi_k3j9x0a2b`.
    pub fn generate() -> Self {
        Self(format!("pi_{}", random_base36(9)))
    }
}

impl PaymentMethodId {
    /// Generate a new payment method token, e.g. `pm_0fz81qe7w3ab`.
    pub fn generate() -> Self {
        Self(format!("pm_{}", random_base36(12)))
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produce `len` random lowercase base-36 characters.
fn random_base36(len: usize) -> String {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("prod-789");
        assert_eq!(format!("{}", id), "prod-789");
    }

    #[test]
    fn test_order_id_format() {
        let id = OrderId::from_timestamp_millis(1_700_000_000_000);
        assert_eq!(id.as_str(), "ORD-1700000000000");
    }

    #[test]
    fn test_payment_intent_id_format() {
        let id = PaymentIntentId::generate();
        let suffix = id.as_str().strip_prefix("pi_").unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_payment_method_id_format() {
        let id = PaymentMethodId::generate();
        let suffix = id.as_str().strip_prefix("pm_").unwrap();
        assert_eq!(suffix.len(), 12);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_random_base36_lengths() {
        assert!(random_base36(0).is_empty());
        assert_eq!(random_base36(32).len(), 32);
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = PaymentMethodId::generate();
        let b = PaymentMethodId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
