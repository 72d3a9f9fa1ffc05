//! Query cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Query cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a backend read stays fresh, in seconds; 0 disables caching
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs > 3600 {
            return Err(ValidationError::CacheTtlTooLarge);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}
