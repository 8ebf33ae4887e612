//! Logging initialization

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Create the log file, persisting it past process exit
fn create_log_file() -> Result<(std::fs::File, PathBuf)> {
    let temp_file = tempfile::Builder::new()
        .prefix("lazystack-")
        .suffix(".log")
        .tempfile()
        .context("Failed to create log file")?;
    let (file, path) = temp_file
        .keep()
        .context("Failed to keep log file")?;
    Ok((file, path))
}

/// Initialize logging based on debug flag
///
/// Logs go to a file so they never interfere with the terminal UI. Returns
/// the log file path if debug logging is enabled.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        return Ok(None);
    }

    let (file, path) = create_log_file()?;

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(Some(path))
}
