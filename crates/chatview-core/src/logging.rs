//! Tracing setup.
//!
//! Interactive mode logs to a daily-rolling file because the terminal belongs
//! to the UI; headless commands log to stderr. `RUST_LOG` overrides the
//! configured level.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Log file prefix inside the log directory.
const LOG_FILE_PREFIX: &str = "chatview.log";

/// Where log records go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Daily-rolling files inside this directory.
    Directory(PathBuf),
}

/// Builds the level filter from `RUST_LOG` or the configured level.
///
/// # Errors
/// Returns an error if the configured level is not a valid filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))
}

/// Installs the global subscriber.
///
/// The returned guard flushes buffered file output on drop; keep it alive for
/// the lifetime of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(None)
        }
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(Some(guard))
        }
    }
}
