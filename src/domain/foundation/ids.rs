//! Strongly-typed identifier value objects.
//!
//! The factory backend owns every record, so identifiers are opaque strings
//! issued by it. They are only checked for being non-blank.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, returning error if blank.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

backend_id!(
    /// Identifier of an authenticated dashboard user.
    UserId,
    "user_id"
);

backend_id!(
    /// Identifier of a dealer account.
    DealerId,
    "dealer_id"
);

backend_id!(
    /// Identifier of a product model in the catalog.
    ModelId,
    "model_id"
);

backend_id!(
    /// Identifier of a spare part.
    PartId,
    "part_id"
);

backend_id!(
    /// Identifier of a persisted dispatch.
    DispatchId,
    "dispatch_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_trims_surrounding_whitespace() {
        let id = ModelId::new("  64f1c2  ").unwrap();
        assert_eq!(id.as_str(), "64f1c2");
    }

    #[test]
    fn blank_id_is_rejected_with_field_name() {
        let err = DealerId::new("   ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("dealer_id"));
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = PartId::new("p-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");
    }
}
