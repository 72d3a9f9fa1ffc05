//! Dispatch desk configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Dispatch numbering and dealer lookup settings
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Prefix for operators whose display name yields none
    #[serde(default = "default_prefix")]
    pub default_prefix: String,

    /// Maximum dealer autocomplete results
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl DispatchConfig {
    /// Validate dispatch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let prefix = self.default_prefix.trim();
        if prefix.is_empty()
            || prefix.len() > 8
            || !prefix.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ValidationError::InvalidDispatchPrefix);
        }
        if self.search_limit == 0 || self.search_limit > 100 {
            return Err(ValidationError::InvalidSearchLimit);
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
            search_limit: default_search_limit(),
        }
    }
}

fn default_prefix() -> String {
    "FD".to_string()
}

fn default_search_limit() -> usize {
    10
}
