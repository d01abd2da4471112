//! Configuration Error Types
//!
//! Errors raised while locating, parsing, merging and validating the
//! service configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Base configuration file not found at expected locations
    #[error("Configuration file not found. Searched paths: {searched_paths:?}")]
    ConfigFileNotFound { searched_paths: Vec<PathBuf> },

    /// Invalid YAML syntax in configuration file
    #[error("Invalid YAML in configuration file '{file_path}': {error}")]
    InvalidYaml { file_path: String, error: String },

    /// Missing required configuration field
    #[error("Missing required configuration field '{field}' in {context}")]
    MissingRequiredField { field: String, context: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },

    /// Environment-specific configuration issues
    #[error("Environment configuration error for '{environment}': {error}")]
    EnvironmentConfigError { environment: String, error: String },

    #[error("Parse Error for file {file_path}: {reason}")]
    ParseError { file_path: String, reason: String },
}

impl ConfigurationError {
    /// Create a configuration file not found error
    pub fn config_file_not_found(searched_paths: Vec<PathBuf>) -> Self {
        Self::ConfigFileNotFound { searched_paths }
    }

    /// Create an invalid YAML error
    pub fn invalid_yaml<P: Into<String>, E: std::fmt::Display>(file_path: P, error: E) -> Self {
        Self::InvalidYaml {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    /// Create a missing required field error
    pub fn missing_required_field<F: Into<String>, C: Into<String>>(field: F, context: C) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<F: Into<String>, V: Into<String>, C: Into<String>>(
        field: F,
        value: V,
        context: C,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    /// Create an environment configuration error
    pub fn environment_config_error<E: Into<String>, R: std::fmt::Display>(
        environment: E,
        error: R,
    ) -> Self {
        Self::EnvironmentConfigError {
            environment: environment.into(),
            error: error.to_string(),
        }
    }

    pub fn parse_error<P: Into<String>, R: std::fmt::Display>(file_path: P, reason: R) -> Self {
        Self::ParseError {
            file_path: file_path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_not_found_error() {
        let paths = vec![
            PathBuf::from("/etc/service/service-core.yaml"),
            PathBuf::from("config/service-core.yaml"),
        ];
        let error = ConfigurationError::config_file_not_found(paths);

        let error_string = error.to_string();
        assert!(error_string.contains("Configuration file not found"));
        assert!(error_string.contains("/etc/service/service-core.yaml"));
    }

    #[test]
    fn test_missing_required_field_error() {
        let error =
            ConfigurationError::missing_required_field("database.host", "database configuration");

        let error_string = error.to_string();
        assert!(error_string.contains("Missing required configuration field 'database.host'"));
        assert!(error_string.contains("database configuration"));
    }

    #[test]
    fn test_invalid_value_error() {
        let error = ConfigurationError::invalid_value(
            "database.max_open_conns",
            "0",
            "pool size must be greater than 0",
        );

        let error_string = error.to_string();
        assert!(error_string.contains("Invalid value '0' for field 'database.max_open_conns'"));
        assert!(error_string.contains("pool size must be greater than 0"));
    }

    #[test]
    fn test_environment_config_error() {
        let error = ConfigurationError::environment_config_error("staging", "bad overlay");
        assert_eq!(
            error.to_string(),
            "Environment configuration error for 'staging': bad overlay"
        );
    }
}
