//! Tracing initialization.
//!
//! Logs go to `<data_dir>/logs/radix.log.YYYY-MM-DD` so they never mix with
//! the interactive console.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RADIX_LOG` takes precedence over `default_level`; an unparsable level
/// falls back to `info`. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(logs_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let filter = EnvFilter::try_from_env("RADIX_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let appender = tracing_appender::rolling::daily(logs_dir, "radix.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
