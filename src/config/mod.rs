//! Cache configuration with layered loading.
//!
//! Configuration is loaded from multiple sources with figment:
//!
//! 1. Environment variables (QCACHE_*)
//! 2. TOML config file (if QCACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Cache configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (QCACHE_*)
/// 2. TOML config file (if QCACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Path to the SQLite database the cache fronts.
    ///
    /// Set via QCACHE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How long a cached entry is served before it goes stale, in
    /// milliseconds.
    ///
    /// Set via QCACHE_TTL_MS environment variable.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Interval between background sweeps of expired entries, in
    /// milliseconds.
    ///
    /// Set via QCACHE_SWEEP_INTERVAL_MS environment variable.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./qcache.sqlite")
}

fn default_ttl_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_sweep_interval_ms() -> u64 {
    600_000 // 10 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            ttl_ms: default_ttl_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

impl CacheConfig {
    /// TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `QCACHE_`
    /// 2. TOML file from `QCACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or parsed, or if
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("QCACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("QCACHE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./qcache.sqlite"));
        assert_eq!(config.ttl_ms, 300_000);
        assert_eq!(config.sweep_interval_ms, 600_000);
    }

    #[test]
    fn test_duration_helpers() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl(), Duration::from_millis(300_000));
        assert_eq!(config.sweep_interval(), Duration::from_millis(600_000));
    }
}
