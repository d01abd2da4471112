//! # Structured Logging Module
//!
//! Environment-aware structured logging to the console and, when a directory
//! is configured, to rotating JSON log files.

use crate::config::{ConfigManager, LogFormat, LogRotation, LoggingConfig};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

/// Holds the file writer guard so buffered lines are flushed for the process lifetime
static LOGGER_INITIALIZED: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Initialize structured logging once per process.
///
/// `RUST_LOG` overrides the configured level, which in turn overrides the
/// environment default. Later calls are no-ops, and an already installed
/// global subscriber is left in place.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let mut layers: Vec<BoxedLayer> = Vec::new();

        let console = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(build_filter(&level))
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(build_filter(&level))
                .boxed(),
        };
        layers.push(console);

        let mut guard = None;
        if let Some(directory) = &config.directory {
            let appender = file_appender(config.rotation, directory, &config.file_prefix);
            let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false)
                    .json()
                    .with_filter(build_filter(&level))
                    .boxed(),
            );
            guard = Some(file_guard);
        }

        if tracing_subscriber::registry().with(layers).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            level = %level,
            log_directory = ?config.directory,
            "🔧 STRUCTURED LOGGING: Initialized"
        );

        guard
    });
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn file_appender(
    rotation: LogRotation,
    directory: &std::path::Path,
    prefix: &str,
) -> RollingFileAppender {
    let file_name = format!("{prefix}.log");
    match rotation {
        LogRotation::Never => rolling::never(directory, file_name),
        LogRotation::Daily => rolling::daily(directory, file_name),
        LogRotation::Hourly => rolling::hourly(directory, file_name),
    }
}

/// Get log level based on environment
pub fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for query operations
pub fn log_query_operation(
    operation: &str,
    table: &str,
    dialect: &str,
    status: &str,
    duration_ms: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        table = %table,
        dialect = %dialect,
        status = %status,
        duration_ms = duration_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "💾 QUERY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "debug");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: Some("debug".to_string()),
            directory: Some(dir.path().to_path_buf()),
            rotation: LogRotation::Daily,
            ..Default::default()
        };

        init_structured_logging(&config);
        init_structured_logging(&LoggingConfig::default());

        log_query_operation("select", "test_users", "sqlite", "ok", Some(3), None);
        log_error("page", "find_page", "boom", Some("test"));
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}
