mod activity_log_config;
mod auth_config;
mod cache_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

pub use activity_log_config::ActivityLogConfig;
pub use auth_config::AuthConfig;
pub use cache_config::CacheConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "SM_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".sm";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "school.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const MIN_DATABASE_MAX_CONNECTIONS: u32 = 1;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 100;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const DEFAULT_CACHE_DIRECTORY: &str = "cache";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_CACHE_CLEANUP_INTERVAL_SECS: u64 = 3600;

const DEFAULT_ACTIVITY_RETENTION_DAYS: u32 = 90;
const MAX_ACTIVITY_RETENTION_DAYS: u32 = 36_500;
const DEFAULT_ACTIVITY_CLEANUP_INTERVAL_HOURS: u32 = 24;
