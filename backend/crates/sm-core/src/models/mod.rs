pub mod account;
pub mod activity_log;
pub mod role;
