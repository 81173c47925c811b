pub mod account_repository;
pub mod activity_log_repository;
pub mod tenant_hierarchy_repository;
