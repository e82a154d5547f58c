//! Configuration validation rules.
//!
//! Validation runs after `CacheConfig` values have been loaded from
//! environment, files, or defaults.

use crate::config::CacheConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl CacheConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `ttl_ms` is 0 or exceeds 24 hours
    /// - `sweep_interval_ms` is less than 1000ms
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_ms == 0 {
            return Err(ConfigError::Invalid { field: "ttl_ms".into(), reason: "must be greater than 0".into() });
        }
        if self.ttl_ms > 86_400_000 {
            return Err(ConfigError::Invalid {
                field: "ttl_ms".into(),
                reason: "must not exceed 24 hours (86400000ms)".into(),
            });
        }

        if self.sweep_interval_ms < 1000 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval_ms".into(),
                reason: "must be at least 1000ms".into(),
            });
        }

        if self.ttl_ms < 1000 {
            tracing::warn!(
                ttl_ms = self.ttl_ms,
                "Sub-second TTL caches almost nothing at typical query rates"
            );
        }

        Ok(())
    }
}
