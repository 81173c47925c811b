//! Background housekeeping loops spawned at startup

use crate::ActivityRecorder;

use sm_cache::FileCache;

use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Purge activity entries older than `retention_days`, every `every`.
pub fn spawn_activity_log_retention(
    recorder: ActivityRecorder,
    retention_days: u32,
    every: Duration,
) -> JoinHandle<()> {
    info!(
        "Activity log retention: {}d, checked every {}",
        retention_days,
        humantime::format_duration(every)
    );

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match recorder.purge_expired(retention_days).await {
                Ok(0) => debug!("Activity log retention: nothing to purge"),
                Ok(removed) => info!("Activity log retention: purged {} entries", removed),
                Err(e) => warn!("Activity log retention failed: {}", e),
            }
        }
    })
}

/// Sweep expired file cache entries every `every`.
pub fn spawn_cache_cleanup(cache: FileCache, every: Duration) -> JoinHandle<()> {
    info!(
        "Cache cleanup for {} every {}",
        cache.dir().display(),
        humantime::format_duration(every)
    );

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match cache.cleanup_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!("Cache cleanup removed {} expired entries", removed),
                Err(e) => warn!("Cache cleanup failed: {}", e),
            }
        }
    })
}
