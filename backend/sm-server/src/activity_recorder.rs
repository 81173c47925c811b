use sm_core::ActivityLog;
use sm_db::{ActivityLogRepository, DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use log::warn;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

/// Fire-and-forget audit trail writer.
///
/// Recording never blocks or fails the request that triggered it.
#[derive(Clone)]
pub struct ActivityRecorder {
    pool: SqlitePool,
}

impl ActivityRecorder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Queue `entry` for insertion and return immediately.
    ///
    /// Insert failures are logged and dropped. The handle is only useful to
    /// callers that need to wait, such as tests.
    pub fn record(&self, entry: ActivityLog) -> JoinHandle<()> {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            if let Err(e) = ActivityLogRepository::create(&pool, &entry).await {
                warn!(
                    "Failed to record '{}' activity for tenant {}: {}",
                    entry.action, entry.tenant_id, e
                );
            }
        })
    }

    /// Delete entries older than `retention_days`. Returns rows removed.
    pub async fn purge_expired(&self, retention_days: u32) -> DbErrorResult<u64> {
        let cutoff = chrono::Duration::try_days(i64::from(retention_days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| DbError::RetentionOutOfRange {
                retention_days,
                location: ErrorLocation::from(Location::caller()),
            })?;

        ActivityLogRepository::delete_older_than(&self.pool, cutoff).await
    }
}
