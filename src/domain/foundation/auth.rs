//! Authentication types for the domain layer.
//!
//! The factory backend issues the session tokens; the dispatch desk only
//! needs to know who the operator is so it can namespace dispatch numbers.
//! Any validator (backend lookup, static tokens in tests) populates these
//! types via the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Operator extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the backend.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if available.
    pub display_name: Option<String>,

    /// Dashboard role (e.g. "factory", "dealer").
    pub role: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            role: None,
        }
    }

    /// Sets the dashboard role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or was refused by the backend.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The backend could not be reached to validate the token.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("u-1").unwrap(),
            "ops@factory.example.com",
            display_name.map(str::to_string),
        )
    }

    #[test]
    fn display_name_preferred_over_email() {
        assert_eq!(user(Some("Sun Light")).display_name_or_email(), "Sun Light");
    }

    #[test]
    fn blank_display_name_falls_back_to_email() {
        assert_eq!(
            user(Some("  ")).display_name_or_email(),
            "ops@factory.example.com"
        );
        assert_eq!(user(None).display_name_or_email(), "ops@factory.example.com");
    }

    #[test]
    fn only_service_unavailable_is_transient() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
