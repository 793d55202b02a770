//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Standard output belongs to the per-download report lines, so tracing
//! never writes there.

use anyhow::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILE_FILTER: &str = "info,fanfetch_core=debug,fanfetch=debug";
const DEFAULT_STDERR_FILTER: &str = "warn";

/// Initialize structured logging to `~/.local/state/fanfetch/fanfetch.log`.
/// On failure (e.g. state dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fanfetch")?;
    let log_file_path = xdg_dirs.place_state_file("fanfetch.log")?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILE_FILTER));

    file_subscriber(file, env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("fanfetch logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

fn file_subscriber(
    file: File,
    env_filter: EnvFilter,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        // Workers log concurrently; the lock keeps each event on its own line.
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .finish()
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
/// Defaults to warnings only so the console report stays readable.
pub fn init_logging_stderr() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
