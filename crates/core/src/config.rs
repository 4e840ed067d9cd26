//! TOML-based configuration for the records core.
//!
//! The database path may be overridden at runtime by an environment variable
//! named in `database.path_env`, resolved via [`AppConfig::resolve_env_vars`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Everything read from the TOML config file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Tracing settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// Where the database lives and how long writers wait on a locked file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file (default `school.db`).
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Environment variable whose value, when set, replaces `path`.
    #[serde(default)]
    pub path_env: Option<String>,

    /// SQLite busy timeout in milliseconds (default 5000).
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("school.db")
}
fn default_busy_timeout() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            path_env: None,
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `contoso_core=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & resolving
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parse the file at `path`. Environment overrides are not applied
    /// here; see [`resolve_env_vars`](Self::resolve_env_vars).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        info!(path = %path.display(), db = %config.database.path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Apply environment overrides. A missing variable logs a warning and
    /// leaves the configured value in place.
    pub fn resolve_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref env_name) = self.database.path_env {
            if let Some(path) = resolve_optional_env(env_name, "database.path_env") {
                self.database.path = PathBuf::from(path);
            }
        }
        Ok(())
    }

    /// Reject values the database layer or the subscriber cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                detail: "database path must not be empty".into(),
            });
        }
        if self.database.busy_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.busy_timeout_ms".into(),
                detail: "busy timeout must be > 0".into(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".into(),
                detail: "log level must not be empty".into(),
            });
        }

        Ok(())
    }

    /// [`load_from_file`](Self::load_from_file), then env overrides, then
    /// [`validate`](Self::validate).
    pub fn load_and_resolve<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.resolve_env_vars()?;
        config.validate().map(|()| config)
    }
}

/// Value of `env_name` if set and non-empty. Unset or empty variables are
/// logged and yield `None`.
fn resolve_optional_env(env_name: &str, field: &str) -> Option<String> {
    match std::env::var(env_name) {
        Ok(value) if !value.is_empty() => {
            debug!(field, env_name, "override taken from environment");
            Some(value)
        }
        Ok(_) => {
            warn!(field, env_name, "override variable is empty, ignoring");
            None
        }
        Err(_) => {
            warn!(field, env_name, "override variable is not set");
            None
        }
    }
}
