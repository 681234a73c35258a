//! Tracing subscriber setup.
//!
//! Honours `RUST_LOG` (default `info`). The interactive mode owns the terminal,
//! so it logs to a file; headless runs log to stderr.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// With a `log_file` the returned guard must be held until exit so buffered
/// lines are flushed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

            Ok(None)
        }
    }
}
