pub mod error;
pub mod models;
pub mod tenant_hierarchy;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::account::Account;
pub use models::activity_log::ActivityLog;
pub use models::role::Role;
pub use tenant_hierarchy::TenantHierarchy;

#[cfg(test)]
mod tests;
