// Central Error Type for the Engine

use std::io;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Request rejected before touching any queue (e.g. put without data)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The overflow log could not be opened or reopened. Callers treat this as fatal.
    #[error("Failed to open overflow log {path}: {source}")]
    OverflowLogOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for errors after which the process must not keep running
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::OverflowLogOpen { .. })
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
