use crate::{
    ActivityLogConfig, AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, CacheConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR, DatabaseConfig, LoggingConfig, ServerConfig,
};

use std::path::{Component, Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub activity_log: ActivityLogConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. SM_CONFIG_DIR env var, else ./.sm/
    /// 2. Create the config directory if it doesn't exist
    /// 3. Parse config.toml if present, else use defaults
    /// 4. Apply SM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: SM_CONFIG_DIR env var > ./.sm/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to fail at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        self.cache.validate()?;
        self.activity_log.validate()?;

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn cache_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.cache.dir))
    }

    /// Absolute log file path, `None` when file logging is off.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };
        Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  auth: HS256, token ttl={}s, secret={}, debug={}",
            self.auth.token_ttl_secs,
            if self.auth.jwt_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.auth.debug
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("none")
        );
        info!(
            "  cache: dir={}, default_ttl={}s, tenant_scope_ttl={}s, cleanup={}s",
            self.cache.dir,
            self.cache.default_ttl_secs,
            self.cache.tenant_scope_ttl_secs,
            self.cache.cleanup_interval_secs
        );
        info!(
            "  activity_log: retention={}d, cleanup={}h",
            self.activity_log.retention_days, self.activity_log.cleanup_interval_hours
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("SM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("SM_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("SM_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "SM_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("SM_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse("SM_AUTH_TOKEN_TTL_SECS", &mut self.auth.token_ttl_secs);
        Self::apply_env_bool("SM_AUTH_DEBUG", &mut self.auth.debug);

        // Logging
        Self::apply_env_parse("SM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SM_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("SM_LOG_DIR", &mut self.logging.dir);

        // Cache
        Self::apply_env_string("SM_CACHE_DIR", &mut self.cache.dir);
        Self::apply_env_parse("SM_CACHE_DEFAULT_TTL_SECS", &mut self.cache.default_ttl_secs);
        Self::apply_env_parse(
            "SM_CACHE_TENANT_SCOPE_TTL_SECS",
            &mut self.cache.tenant_scope_ttl_secs,
        );
        Self::apply_env_parse(
            "SM_CACHE_CLEANUP_INTERVAL_SECS",
            &mut self.cache.cleanup_interval_secs,
        );

        // Activity Log
        Self::apply_env_parse(
            "SM_ACTIVITY_LOG_RETENTION_DAYS",
            &mut self.activity_log.retention_days,
        );
        Self::apply_env_parse(
            "SM_ACTIVITY_LOG_CLEANUP_INTERVAL_HOURS",
            &mut self.activity_log.cleanup_interval_hours,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values leave the target untouched
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

/// Relative, non-empty, and never steps outside its base directory.
pub(crate) fn is_contained_relative_path(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && !path.is_absolute()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
