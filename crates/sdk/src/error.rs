//! SDK Error Types
//!
//! Daemon error codes are decoded into typed variants so callers can tell a
//! rejected request from a daemon that has lost its overflow log.

use jsonrpsee::core::ClientError;
use jsonrpsee::types::ErrorObjectOwned;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// Error codes sent by the daemon
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SYSTEM_ERROR: i32 = 5002;
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// The daemon rejected the request (e.g. put without data)
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Overflow log or other system failure; the daemon is shutting down
    #[error("Daemon failure: {0}")]
    Fatal(String),

    /// Any other daemon-side error, with its raw code
    #[error("Daemon error ({code}): {message}")]
    Daemon { code: i32, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// Daemon error code, when the error came from the daemon
    pub fn code(&self) -> Option<i32> {
        match self {
            SdkError::Rejected(_) => Some(code::VALIDATION_ERROR),
            SdkError::Fatal(_) => Some(code::SYSTEM_ERROR),
            SdkError::Daemon { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<ErrorObjectOwned> for SdkError {
    fn from(err: ErrorObjectOwned) -> Self {
        let message = err.message().to_string();
        match err.code() {
            code::VALIDATION_ERROR => SdkError::Rejected(message),
            code::SYSTEM_ERROR => SdkError::Fatal(message),
            code => SdkError::Daemon { code, message },
        }
    }
}

impl From<ClientError> for SdkError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Call(err) => err.into(),
            ClientError::Transport(e) => SdkError::Transport(e.to_string()),
            ClientError::RestartNeeded(e) => SdkError::Connection(e.to_string()),
            ClientError::ParseError(e) => SdkError::Serialization(e),
            ClientError::RequestTimeout => SdkError::Timeout,
            other => SdkError::Other(other.to_string()),
        }
    }
}
