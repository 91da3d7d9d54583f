//! Log file setup
//!
//! The terminal belongs to the TUI, so tracing output goes to a file. The
//! default location is next to the executable, falling back to the working
//! directory. `RUST_LOG` overrides the `info` default filter.

use crate::error::{ProdViewError, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "prodview.log";

/// Default log path (same directory as the executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Truncate-open the first writable candidate
fn open_first(candidates: &[PathBuf]) -> io::Result<(PathBuf, File)> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no log location");
    for path in candidates {
        match OpenOptions::new().create(true).write(true).truncate(true).open(path) {
            Ok(file) => return Ok((path.clone(), file)),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

/// Install the global subscriber writing to `path` (or the default path).
///
/// The file is truncated so each run starts fresh. Returns the path in use.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    // An explicit path gets no fallback
    let candidates = match path {
        Some(p) => vec![p.to_path_buf()],
        None => vec![default_log_path(), PathBuf::from(LOG_FILE_NAME)],
    };
    let (path, file) = open_first(&candidates)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| ProdViewError::Logging(e.to_string()))?;

    tracing::info!(version = crate::VERSION, log = %path.display(), "logging initialised");
    Ok(path)
}
