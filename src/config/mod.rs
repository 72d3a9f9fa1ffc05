//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FACTORY_DISPATCH` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use factory_dispatch::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod backend;
mod cache;
mod dispatch;
mod error;
mod server;

pub use backend::BackendConfig;
pub use cache::CacheConfig;
pub use dispatch::DispatchConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a development
/// server backed by in-memory data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Factory backend connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// Dispatch numbering and dealer search
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Query cache
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FACTORY_DISPATCH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `FACTORY_DISPATCH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FACTORY_DISPATCH__BACKEND__BASE_URL=...` -> `backend.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FACTORY_DISPATCH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate(self.is_production())?;
        self.dispatch.validate()?;
        self.cache.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "FACTORY_DISPATCH__SERVER__PORT",
        "FACTORY_DISPATCH__SERVER__ENVIRONMENT",
        "FACTORY_DISPATCH__BACKEND__BASE_URL",
        "FACTORY_DISPATCH__BACKEND__DEV_TOKEN",
        "FACTORY_DISPATCH__DISPATCH__DEFAULT_PREFIX",
        "FACTORY_DISPATCH__CACHE__TTL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_gives_development_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.backend.is_in_memory());
        assert_eq!(config.dispatch.default_prefix, "FD");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FACTORY_DISPATCH__SERVER__PORT", "3000");
        env::set_var("FACTORY_DISPATCH__BACKEND__BASE_URL", "http://factory.local/api");
        env::set_var("FACTORY_DISPATCH__DISPATCH__DEFAULT_PREFIX", "SL");
        env::set_var("FACTORY_DISPATCH__CACHE__TTL_SECS", "15");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url(), Some("http://factory.local/api"));
        assert_eq!(config.dispatch.default_prefix, "SL");
        assert_eq!(config.cache.ttl_secs, 15);
    }

    #[test]
    fn test_production_without_backend_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FACTORY_DISPATCH__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("BACKEND__BASE_URL"))
        );
    }

    #[test]
    fn test_dev_token_rejected_in_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FACTORY_DISPATCH__SERVER__ENVIRONMENT", "production");
        env::set_var("FACTORY_DISPATCH__BACKEND__BASE_URL", "https://factory.example.com/api");
        env::set_var("FACTORY_DISPATCH__BACKEND__DEV_TOKEN", "letmein");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::DevTokenInProduction));
    }
}
