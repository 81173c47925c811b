use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CACHE_CLEANUP_INTERVAL_SECS, DEFAULT_CACHE_DIRECTORY,
    DEFAULT_CACHE_TTL_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory, relative to the config directory
    pub dir: String,
    /// TTL for entries written without one (0 = never expire)
    pub default_ttl_secs: u64,
    /// Cache tenant hierarchy lookups for this long (0 = disabled)
    pub tenant_scope_ttl_secs: u64,
    /// Expired entry sweep interval (0 = disabled)
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_CACHE_DIRECTORY),
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            tenant_scope_ttl_secs: 0,
            cleanup_interval_secs: DEFAULT_CACHE_CLEANUP_INTERVAL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !crate::config::is_contained_relative_path(&self.dir) {
            return Err(ConfigError::cache(
                "cache.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        non_zero_secs(self.default_ttl_secs)
    }

    pub fn tenant_scope_ttl(&self) -> Option<Duration> {
        non_zero_secs(self.tenant_scope_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Option<Duration> {
        non_zero_secs(self.cleanup_interval_secs)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
