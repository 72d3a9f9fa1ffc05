//! Session validator backed by a fixed token table.
//!
//! Used by the tests and by the server in development when no factory
//! backend is configured. Production sessions are resolved by the backend.
//!
//! # Example
//!
//! ```ignore
//! let validator = StaticTokenValidator::new()
//!     .with_operator("dev-token", "operator-1", "Sun Light");
//!
//! let user = validator.validate("dev-token").await?;
//! assert_eq!(user.display_name.as_deref(), Some("Sun Light"));
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Maps known tokens to operators. Unknown tokens are `InvalidToken`.
#[derive(Debug, Default)]
pub struct StaticTokenValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation while set.
    force_error: RwLock<Option<AuthError>>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.get_mut().insert(token.into(), user);
        self
    }

    /// Adds a factory operator with the given display name.
    ///
    /// Blank ids are ignored; the token table is configuration, not input.
    pub fn with_operator(
        self,
        token: impl Into<String>,
        user_id: &str,
        display_name: impl Into<String>,
    ) -> Self {
        let Ok(id) = UserId::new(user_id) else {
            tracing::warn!("Ignoring static token entry without a user id");
            return self;
        };
        let user = AuthenticatedUser::new(
            id,
            format!("{}@factory.local", user_id.trim()),
            Some(display_name.into()),
        )
        .with_role("factory");
        self.with_user(token, user)
    }

    pub fn with_error(mut self, error: AuthError) -> Self {
        *self.force_error.get_mut() = Some(error);
        self
    }

    pub async fn clear_error(&self) {
        *self.force_error.write().await = None;
    }

    pub async fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().await.insert(token.into(), user);
    }

    pub async fn remove_token(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl SessionValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().await.clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "ops@example.com",
            Some("Sun Light".to_string()),
        )
    }

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator = StaticTokenValidator::new().with_user("valid-token", operator());

        let user = validator.validate("valid-token").await.unwrap();

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "ops@example.com");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = StaticTokenValidator::new();

        let result = validator.validate("unknown-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn operator_entry_carries_display_name_and_role() {
        let validator = StaticTokenValidator::new().with_operator("dev", "op-1", "Factory Desk");

        let user = validator.validate("dev").await.unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Factory Desk"));
        assert_eq!(user.role.as_deref(), Some("factory"));
    }

    #[tokio::test]
    async fn blank_operator_id_is_skipped() {
        let validator = StaticTokenValidator::new().with_operator("dev", "  ", "Nobody");
        assert_eq!(validator.token_count().await, 0);
    }

    #[tokio::test]
    async fn forced_error_until_cleared() {
        let validator = StaticTokenValidator::new()
            .with_user("valid-token", operator())
            .with_error(AuthError::ServiceUnavailable("Test".to_string()));

        assert!(validator.validate("valid-token").await.is_err());

        validator.clear_error().await;

        assert!(validator.validate("valid-token").await.is_ok());
    }

    #[tokio::test]
    async fn tokens_can_be_added_and_removed_at_runtime() {
        let validator = StaticTokenValidator::new();
        validator.add_token("new-token", operator()).await;
        assert!(validator.validate("new-token").await.is_ok());

        validator.remove_token("new-token").await;
        assert!(validator.validate("new-token").await.is_err());
    }
}
