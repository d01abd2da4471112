//! Configuration Loader
//!
//! Environment-aware configuration loading. A required base file
//! `service-core.yaml` is merged with an optional `service-core.<env>.yaml`
//! overlay, then with `SERVICE_CORE__SECTION__KEY` environment variables.

use super::error::{ConfigResult, ConfigurationError};
use super::CoreConfig;
use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const CONFIG_FILE_STEM: &str = "service-core";
const ENV_PREFIX: &str = "SERVICE_CORE";

/// Loaded configuration plus the environment and directory it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: CoreConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_and_merge_config(&config_directory, environment)?;
        config.validate()?;

        debug!(
            "Configuration loaded successfully: {}",
            serde_json::to_string(&Self::sanitize_config_for_logging(&config))
                .unwrap_or_else(|_| "[serialization error]".to_string())
        );

        info!(
            environment = environment,
            driver = ?config.database.driver,
            database_host = %config.database.host,
            max_open_conns = config.database.max_open_conns,
            "⚙️ CONFIG: Configuration loaded"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Configuration as JSON with passwords and other secrets masked
    pub fn debug_config(&self) -> serde_json::Value {
        Self::sanitize_config_for_logging(&self.config)
    }

    /// Get the current environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the configuration directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// `SERVICE_CORE_ENV`, then `APP_ENV`, then `development`
    pub fn detect_environment() -> String {
        env::var("SERVICE_CORE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    /// `SERVICE_CORE_CONFIG_DIR` when set, otherwise `./config`
    pub fn default_config_directory() -> PathBuf {
        env::var("SERVICE_CORE_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn load_and_merge_config(config_directory: &Path, environment: &str) -> ConfigResult<CoreConfig> {
        let base_path = config_directory.join(format!("{CONFIG_FILE_STEM}.yaml"));
        if !base_path.is_file() {
            return Err(ConfigurationError::config_file_not_found(vec![base_path]));
        }

        let overlay_path = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.yaml"));
        if overlay_path.is_file() {
            debug!("Applying environment overlay: {}", overlay_path.display());
        }

        let merged = Config::builder()
            .add_source(File::from(base_path.clone()).format(FileFormat::Yaml))
            .add_source(
                File::from(overlay_path.clone())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| match e {
                config::ConfigError::FileParse { uri, cause } => ConfigurationError::invalid_yaml(
                    uri.unwrap_or_else(|| base_path.display().to_string()),
                    cause,
                ),
                other => ConfigurationError::environment_config_error(environment, other),
            })?;

        merged
            .try_deserialize::<CoreConfig>()
            .map_err(|e| ConfigurationError::parse_error(base_path.display().to_string(), e))
    }

    fn sanitize_config_for_logging(config: &CoreConfig) -> serde_json::Value {
        let mut config_json = serde_json::json!(config);
        let sensitive_patterns = ["password", "secret", "key", "token", "credential"];
        Self::sanitize_json_recursive(&mut config_json, &sensitive_patterns);
        config_json
    }

    fn sanitize_json_recursive(value: &mut serde_json::Value, sensitive_patterns: &[&str]) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    let key_lower = key.to_lowercase();
                    let is_sensitive = sensitive_patterns
                        .iter()
                        .any(|pattern| key_lower.contains(pattern));

                    if !is_sensitive {
                        Self::sanitize_json_recursive(val, sensitive_patterns);
                        continue;
                    }

                    *val = match val {
                        serde_json::Value::String(s) if s.is_empty() => {
                            serde_json::Value::String("[EMPTY]".to_string())
                        }
                        _ => serde_json::Value::String("[MASKED]".to_string()),
                    };
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    Self::sanitize_json_recursive(item, sensitive_patterns);
                }
            }
            _ => {}
        }
    }
}
