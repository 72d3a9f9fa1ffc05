//! Dispatch-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Failure to turn an upload into candidate serials.
///
/// A failed parse yields no serials at all; there is no partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerialImportError {
    #[error("Could not read uploaded file: {0}")]
    Unreadable(String),

    #[error("Uploaded file contains no rows")]
    Empty,
}

/// Dispatch-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A required form field is blank. Checked before reconciliation.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Every candidate serial was rejected (or none were given).
    #[error("No valid serial numbers to dispatch ({rejected} rejected)")]
    NoValidSerials { rejected: usize },

    #[error(transparent)]
    Import(#[from] SerialImportError),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// The backend refused or failed the request; message is passed through.
    #[error("{0}")]
    Backend(String),
}

impl DispatchError {
    pub fn backend(message: impl Into<String>) -> Self {
        DispatchError::Backend(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DispatchError::MissingField(_) => ErrorCode::EmptyField,
            DispatchError::NoValidSerials { .. } => ErrorCode::NoValidSerials,
            DispatchError::Import(_) => ErrorCode::ImportFailed,
            DispatchError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DispatchError::Backend(_) => ErrorCode::BackendError,
        }
    }
}

impl From<ValidationError> for DispatchError {
    fn from(err: ValidationError) -> Self {
        DispatchError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for DispatchError {
    fn from(err: DomainError) -> Self {
        DispatchError::Backend(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            DispatchError::MissingField("Dealer name").to_string(),
            "Dealer name is required"
        );
    }

    #[test]
    fn backend_message_is_passed_through() {
        let err = DispatchError::backend("Dispatch number already exists");
        assert_eq!(err.to_string(), "Dispatch number already exists");
        assert_eq!(err.code(), ErrorCode::BackendError);
    }

    #[test]
    fn import_error_converts() {
        let err: DispatchError = SerialImportError::Empty.into();
        assert_eq!(err.code(), ErrorCode::ImportFailed);
    }
}
