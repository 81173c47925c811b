use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACTIVITY_CLEANUP_INTERVAL_HOURS,
    DEFAULT_ACTIVITY_RETENTION_DAYS, MAX_ACTIVITY_RETENTION_DAYS,
};

use std::time::Duration;

use serde::Deserialize;

// Activity log retention configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActivityLogConfig {
    /// Number of days to retain activity logs (default: 90)
    pub retention_days: u32,

    /// Cleanup interval in hours (default: 24)
    pub cleanup_interval_hours: u32,
}

impl Default for ActivityLogConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_ACTIVITY_RETENTION_DAYS,
            cleanup_interval_hours: DEFAULT_ACTIVITY_CLEANUP_INTERVAL_HOURS,
        }
    }
}

impl ActivityLogConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(1..=MAX_ACTIVITY_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ConfigError::config(format!(
                "activity_log.retention_days must be between 1 and {}",
                MAX_ACTIVITY_RETENTION_DAYS
            )));
        }

        if self.cleanup_interval_hours == 0 {
            return Err(ConfigError::config(
                "activity_log.cleanup_interval_hours must be at least 1",
            ));
        }

        Ok(())
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.cleanup_interval_hours) * 60 * 60)
    }
}
