use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] sm_config::ConfigError),

    #[error("Environment file error: {0}")]
    Env(#[from] dotenvy::Error),

    #[error("Database error: {0}")]
    Database(#[from] sm_db::DbError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
