//! Factory backend configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Factory backend connection
///
/// Without a `base_url` the server runs against the in-memory backend and
/// authenticates with `dev_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// REST API base URL, e.g. `https://factory.example.com/api`
    pub base_url: Option<String>,

    /// Service token sent with data calls
    pub api_token: Option<Secret<String>>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token accepted in development mode
    pub dev_token: Option<String>,

    /// Display name of the development operator
    #[serde(default = "default_dev_operator")]
    pub dev_operator: String,
}

impl BackendConfig {
    /// Configured base URL, ignoring blanks
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// True when no backend URL is configured
    pub fn is_in_memory(&self) -> bool {
        self.base_url().is_none()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate backend configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidBackendTimeout);
        }

        match self.base_url() {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidBackendUrl);
                }
                if production && !url.starts_with("https://") {
                    return Err(ValidationError::BackendMustBeHttps);
                }
            }
            None if production => return Err(ValidationError::MissingRequired("BACKEND__BASE_URL")),
            None => {}
        }

        if production && self.dev_token.is_some() {
            return Err(ValidationError::DevTokenInProduction);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout_secs: default_timeout(),
            dev_token: None,
            dev_operator: default_dev_operator(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_dev_operator() -> String {
    "Factory Desk".to_string()
}
