//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to a file instead of stderr.
//! `RUST_LOG` controls the filter; the default is `info`.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber writing to `path`.
///
/// The returned guard flushes buffered log lines on drop; keep it alive for
/// the lifetime of the program.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init(path: &Path) -> Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
