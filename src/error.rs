//! Error types for the service core.
//!

use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::ValidationError(format!("JSON serialization error: {error}"))
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::DatabaseError(err.to_string())
    }
}

impl From<ConfigurationError> for CoreError {
    fn from(err: ConfigurationError) -> Self {
        CoreError::ConfigurationError(err.to_string())
    }
}

pub type CoreResult<T> = anyhow::Result<T, CoreError>;
