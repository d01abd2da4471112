//! # Service Core Configuration
//!
//! Explicit, validated configuration for the database handler and logging.
//! Nothing reads package-level globals; callers load a [`CoreConfig`] and pass
//! its sections to the constructors that need them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use service_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Loads config/service-core.yaml plus the overlay for the detected environment
//! let manager = ConfigManager::load()?;
//!
//! let url = manager.config().database.database_url();
//! let pool_size = manager.config().database.max_open_conns;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::log::LevelFilter;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring service-core.yaml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Database connection and pooling configuration
    pub database: DatabaseConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

impl CoreConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.database.validate()?;
        self.logging.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    MySql,
    #[serde(alias = "postgre", alias = "postgresql")]
    Postgres,
    Sqlite,
}

impl DatabaseDriver {
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseDriver::MySql => 3306,
            DatabaseDriver::Postgres => 5432,
            DatabaseDriver::Sqlite => 0,
        }
    }
}

/// Database connection and pool settings.
///
/// Durations are whole seconds; `0` leaves the pool's limit unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    pub host: String,
    /// Driver default when absent
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    pub dbname: String,
    /// Extra connection parameters appended to the URL query, e.g. `charset=utf8mb4`
    pub params: String,
    /// SQLite file path; empty or `:memory:` opens an in-memory database
    pub db_path: String,
    pub max_open_conns: u32,
    /// Kept open even when idle
    pub max_idle_conns: u32,
    pub conn_max_idle_time: u64,
    pub conn_max_life_time: u64,
    pub acquire_timeout_seconds: u64,
    /// Statement logging: `silent`, `error`, `warn` or `info`
    pub log_level: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            dbname: String::new(),
            params: String::new(),
            db_path: String::new(),
            max_open_conns: 10,
            max_idle_conns: 2,
            conn_max_idle_time: 0,
            conn_max_life_time: 0,
            acquire_timeout_seconds: 30,
            log_level: "error".to_string(),
        }
    }
}

const STATEMENT_LOG_LEVELS: [&str; 4] = ["silent", "error", "warn", "info"];

impl DatabaseConfig {
    /// In-memory SQLite with a single connection, so every query sees the same database
    pub fn sqlite_memory() -> Self {
        Self {
            driver: DatabaseDriver::Sqlite,
            db_path: ":memory:".to_string(),
            max_open_conns: 1,
            max_idle_conns: 1,
            ..Default::default()
        }
    }

    /// Connection URL for the configured driver with credentials percent-encoded
    pub fn database_url(&self) -> String {
        match self.driver {
            DatabaseDriver::Sqlite => {
                if self.db_path.is_empty() || self.db_path == ":memory:" {
                    "sqlite::memory:".to_string()
                } else {
                    format!("sqlite://{}?mode=rwc", self.db_path)
                }
            }
            DatabaseDriver::MySql => self.network_url("mysql"),
            DatabaseDriver::Postgres => self.network_url("postgres"),
        }
    }

    fn network_url(&self, scheme: &str) -> String {
        let port = self.port.unwrap_or_else(|| self.driver.default_port());
        let mut url = format!(
            "{scheme}://{}:{}@{}:{port}/{}",
            utf8_percent_encode(&self.username, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.password, NON_ALPHANUMERIC),
            self.host,
            utf8_percent_encode(&self.dbname, NON_ALPHANUMERIC),
        );
        if !self.params.is_empty() {
            url.push('?');
            url.push_str(self.params.trim_start_matches('?'));
        }
        url
    }

    /// Level at which executed statements are logged; unknown names fall back to `error`
    pub fn statement_log_level(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "silent" => LevelFilter::Off,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            _ => LevelFilter::Error,
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.conn_max_idle_time > 0).then(|| Duration::from_secs(self.conn_max_idle_time))
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        (self.conn_max_life_time > 0).then(|| Duration::from_secs(self.conn_max_life_time))
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.driver != DatabaseDriver::Sqlite {
            if self.host.is_empty() {
                return Err(ConfigurationError::missing_required_field(
                    "database.host",
                    "database configuration",
                ));
            }
            if self.dbname.is_empty() {
                return Err(ConfigurationError::missing_required_field(
                    "database.dbname",
                    "database configuration",
                ));
            }
        }

        if self.max_open_conns == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_open_conns",
                "0",
                "pool size must be greater than 0",
            ));
        }

        if self.max_idle_conns > self.max_open_conns {
            return Err(ConfigurationError::invalid_value(
                "database.max_idle_conns",
                self.max_idle_conns.to_string(),
                format!("must not exceed max_open_conns ({})", self.max_open_conns),
            ));
        }

        if !STATEMENT_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigurationError::invalid_value(
                "database.log_level",
                self.log_level.clone(),
                "expected one of silent, error, warn, info",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; the environment default is used when absent
    pub level: Option<String>,
    pub format: LogFormat,
    /// JSON log files are written here when set
    pub directory: Option<PathBuf>,
    pub rotation: LogRotation,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: LogFormat::default(),
            directory: None,
            rotation: LogRotation::default(),
            file_prefix: "service-core".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.directory.is_some() && self.file_prefix.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "logging.file_prefix",
                "file logging configuration",
            ));
        }
        Ok(())
    }
}
