//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Backend URL must start with http:// or https://")]
    InvalidBackendUrl,

    #[error("Backend URL must use HTTPS in production")]
    BackendMustBeHttps,

    #[error("Invalid backend timeout")]
    InvalidBackendTimeout,

    #[error("Dispatch prefix must be 1-8 ASCII letters")]
    InvalidDispatchPrefix,

    #[error("Dealer search limit must be between 1 and 100")]
    InvalidSearchLimit,

    #[error("Cache TTL exceeds maximum allowed (3600 seconds)")]
    CacheTtlTooLarge,

    #[error("A development token cannot be used in production")]
    DevTokenInProduction,
}
