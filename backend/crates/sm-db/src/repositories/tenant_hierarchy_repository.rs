use crate::{DbError, Result as DbErrorResult};

use sm_core::{Result as CoreErrorResult, TenantHierarchy};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use sqlx::SqlitePool;

/// Delegation chains deeper than this are treated as corrupt.
pub const DEFAULT_MAX_HIERARCHY_DEPTH: i64 = 16;

/// Resolves admins, principals and sub-admins to the admin at the top of their chain
#[derive(Clone)]
pub struct TenantHierarchyRepository {
    pool: SqlitePool,
    max_depth: i64,
}

impl TenantHierarchyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            max_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Root admin id for `admin_id`.
    ///
    /// An id missing from `admins` is its own root. A parent pointer to a
    /// missing row stops the walk at the last row that exists.
    pub async fn find_root_id(&self, admin_id: i64) -> DbErrorResult<i64> {
        let top: Option<(i64, Option<i64>, i64)> = sqlx::query_as(
            r#"
              WITH RECURSIVE chain(id, parent_admin_id, depth) AS (
                  SELECT id, parent_admin_id, 0
                  FROM admins
                  WHERE id = ?
                  UNION ALL
                  SELECT a.id, a.parent_admin_id, chain.depth + 1
                  FROM admins a
                  JOIN chain ON a.id = chain.parent_admin_id
                  WHERE chain.depth < ?
              )
              SELECT id, parent_admin_id, depth
              FROM chain
              ORDER BY depth DESC
              LIMIT 1
              "#,
        )
        .bind(admin_id)
        .bind(self.max_depth)
        .fetch_optional(&self.pool)
        .await?;

        match top {
            None => Ok(admin_id),
            Some((_, Some(_), depth)) if depth >= self.max_depth => {
                Err(DbError::HierarchyTooDeep {
                    candidate_id: admin_id,
                    max_depth: self.max_depth,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Some((root_id, _, _)) => Ok(root_id),
        }
    }

    /// Insert an admin row; `parent_admin_id = None` creates a new tenant root.
    pub async fn create_admin(
        &self,
        name: &str,
        role: &str,
        parent_admin_id: Option<i64>,
    ) -> DbErrorResult<i64> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
              INSERT INTO admins (parent_admin_id, role, name, created_at)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(parent_admin_id)
        .bind(role)
        .bind(name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl TenantHierarchy for TenantHierarchyRepository {
    async fn root_tenant_id(&self, candidate_id: i64) -> CoreErrorResult<i64> {
        self.find_root_id(candidate_id)
            .await
            .map_err(|e| e.into_tenant_lookup(candidate_id))
    }
}
