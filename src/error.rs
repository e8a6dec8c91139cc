//! Error types for Kiln
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ProcessingState;

/// Result type alias for Kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Main error type for Kiln operations
#[derive(Error, Debug)]
pub enum KilnError {
    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error
    #[error(transparent)]
    Fs(#[from] crate::domain::ports::FsError),

    /// Build root not found
    #[error("directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// No engine handles the file's extension
    #[error("no engine registered for {}", .path.display())]
    NoEngine { path: PathBuf },

    /// A file record was driven backwards or out of a terminal state
    #[error("invalid state transition for {}: {from:?} -> {to:?}", .path.display())]
    InvalidTransition {
        path: PathBuf,
        from: ProcessingState,
        to: ProcessingState,
    },

    /// Ignore file could not be loaded
    #[error(transparent)]
    Ignore(#[from] crate::domain::value_objects::IgnoreError),

    /// Worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),

    /// File watcher failure
    #[error("watch error: {0}")]
    Watch(String),
}
