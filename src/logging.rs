//! Log file setup.
//!
//! The terminal is owned by the UI, so `tracing` output goes to
//! `<home>/logs/qchat.log`. `RUST_LOG` overrides the default filter.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "qchat.log";
pub const DEFAULT_LOG_FILTER: &str = "qchat=info";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber writing to `<log_dir>/qchat.log`.
///
/// Returns the log file path. Fails if the directory or file cannot be
/// created; a subscriber already being installed is not an error.
pub fn init(log_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .try_init();

    tracing::info!("qchat {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(path)
}
