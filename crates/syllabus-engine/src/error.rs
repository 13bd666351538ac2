use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving session state.
///
/// Engine operations themselves never fail; only the persistence boundary does.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error("state file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported state version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("state path has no parent directory: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
