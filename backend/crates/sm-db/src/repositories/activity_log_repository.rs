use crate::{DbError, Result as DbErrorResult};

use sm_core::ActivityLog;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
struct ActivityLogRow {
    id: String,
    tenant_id: i64,
    actor_id: i64,
    role: String,
    action: String,
    entity_type: Option<String>,
    entity_id: Option<i64>,
    description: Option<String>,
    ip_address: Option<String>,
    created_at: i64,
}

impl TryFrom<ActivityLogRow> for ActivityLog {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: ActivityLogRow) -> DbErrorResult<Self> {
        let id = Uuid::parse_str(&row.id).map_err(|e| DbError::CorruptRow {
            table: "activity_log",
            message: format!("invalid id '{}': {}", row.id, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let created_at =
            DateTime::from_timestamp(row.created_at, 0).ok_or_else(|| DbError::CorruptRow {
                table: "activity_log",
                message: format!("invalid created_at {}", row.created_at),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            id,
            tenant_id: row.tenant_id,
            actor_id: row.actor_id,
            role: row.role,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            description: row.description,
            ip_address: row.ip_address,
            created_at,
        })
    }
}

pub struct ActivityLogRepository;

impl ActivityLogRepository {
    pub async fn create<'e, E>(executor: E, log: &ActivityLog) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO activity_log (
                  id, tenant_id, actor_id, role, action,
                  entity_type, entity_id, description, ip_address, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(log.id.to_string())
        .bind(log.tenant_id)
        .bind(log.actor_id)
        .bind(&log.role)
        .bind(&log.action)
        .bind(&log.entity_type)
        .bind(log.entity_id)
        .bind(&log.description)
        .bind(&log.ip_address)
        .bind(log.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Most recent entries for a tenant, newest first
    pub async fn find_by_tenant<'e, E>(
        executor: E,
        tenant_id: i64,
        limit: i64,
    ) -> DbErrorResult<Vec<ActivityLog>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows: Vec<ActivityLogRow> = sqlx::query_as(
            r#"
              SELECT id, tenant_id, actor_id, role, action,
                     entity_type, entity_id, description, ip_address, created_at
              FROM activity_log
              WHERE tenant_id = ?
              ORDER BY created_at DESC, rowid DESC
              LIMIT ?
              "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(ActivityLog::try_from).collect()
    }

    /// Delete entries created before `cutoff`; returns rows removed
    pub async fn delete_older_than<'e, E>(executor: E, cutoff: DateTime<Utc>) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM activity_log WHERE created_at < ?")
            .bind(cutoff.timestamp())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
