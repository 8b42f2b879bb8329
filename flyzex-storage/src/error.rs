//! Storage error types.

use thiserror::Error;

/// Errors that can occur when loading or persisting guild state.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
