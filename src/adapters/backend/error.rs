//! Errors raised while talking to the factory backend.

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Message shown when the backend gave no usable reason.
pub const FALLBACK_MESSAGE: &str = "Request failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection, timeout or client construction failure.
    #[error("Backend unreachable: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the backend's own reason, if any.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Status { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Not found: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    NotFound { message: Option<String> },
}

impl BackendError {
    /// Builds the error for a non-2xx status from the raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body);
        if status == 404 {
            BackendError::NotFound { message }
        } else {
            BackendError::Status { status, message }
        }
    }

    /// Text safe to show the operator: the backend's message verbatim, or the
    /// generic fallback.
    pub fn message(&self) -> &str {
        match self {
            BackendError::Status {
                message: Some(message),
                ..
            }
            | BackendError::NotFound {
                message: Some(message),
            } => message,
            _ => FALLBACK_MESSAGE,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            BackendError::Status { status: 401, .. } => ErrorCode::Unauthorized,
            BackendError::Status { status: 403, .. } => ErrorCode::Forbidden,
            BackendError::NotFound { .. } => ErrorCode::NotFound,
            _ => ErrorCode::BackendError,
        }
    }
}

impl From<BackendError> for DomainError {
    fn from(err: BackendError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err {
            BackendError::Status { status, .. } => domain.with_detail("status", status.to_string()),
            _ => domain,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

/// Pulls the human readable reason out of an error body.
///
/// Accepts `{"message": "..."}`, `{"error": "..."}` and
/// `{"error": {"message": "..."}}`. Blank strings count as absent.
pub fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let candidate = value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.get("error").and_then(Value::as_str))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })?;

    let trimmed = candidate.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
