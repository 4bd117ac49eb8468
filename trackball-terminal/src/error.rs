//! Viewer errors with process exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: terminal I/O error
//! - 11: configuration file could not be read or parsed
//! - 12: invalid trackball or viewport settings

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use trackball_core::TrackballError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Trackball(#[from] TrackballError),
}

impl AppError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Io(_) => 10,
            AppError::ConfigRead { .. } | AppError::ConfigParse(_) => 11,
            AppError::Trackball(_) => 12,
        }
    }
}
