//! Error types for the vidshelf-core library.
//!
//! Every fallible operation in the crate returns [`CoreResult`]. The
//! method-call boundary flattens these into a single caller-facing code, so
//! the variants here exist for logging and for tests, not for recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for vidshelf
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Video file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to create media store entry: {0}")]
    RegistryInsertFailed(String),

    #[error("Failed to copy video data: {0}")]
    TransferFailed(#[source] std::io::Error),

    #[error("Failed to publish media store entry: {0}")]
    RegistryUpdateFailed(String),

    #[error("Media store entry not found: {0}")]
    EntryNotFound(String),

    #[error("Missing required arguments")]
    MissingArguments,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for vidshelf operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
