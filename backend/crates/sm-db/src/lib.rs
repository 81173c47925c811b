pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{create_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::activity_log_repository::ActivityLogRepository;
pub use repositories::tenant_hierarchy_repository::{
    DEFAULT_MAX_HIERARCHY_DEPTH, TenantHierarchyRepository,
};
