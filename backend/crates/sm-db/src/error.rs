use sm_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Admin hierarchy for {candidate_id} exceeds {max_depth} levels (cycle?) {location}")]
    HierarchyTooDeep {
        candidate_id: i64,
        max_depth: i64,
        location: ErrorLocation,
    },

    #[error("Retention of {retention_days} days reaches past the representable date range {location}")]
    RetentionOutOfRange {
        retention_days: u32,
        location: ErrorLocation,
    },

    #[error("Corrupt row in {table}: {message} {location}")]
    CorruptRow {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl DbError {
    /// Wrap as the store-agnostic error the tenant resolver understands
    #[track_caller]
    pub fn into_tenant_lookup(self, candidate_id: i64) -> CoreError {
        CoreError::TenantLookup {
            candidate_id,
            message: self.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
