//! RPC Error Types
//!
//! Maps engine errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use simplequeue_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        e @ AppError::OverflowLogOpen { .. } => {
            ErrorObjectOwned::owned(code::SYSTEM_ERROR, e.to_string(), None::<()>)
        }
        AppError::Io(e) => ErrorObjectOwned::owned(code::SYSTEM_ERROR, e.to_string(), None::<()>),
        AppError::Serialization(e) => {
            ErrorObjectOwned::owned(code::INTERNAL_ERROR, e.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_4000() {
        let err = to_rpc_error(AppError::Validation("missing data".to_string()));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert_eq!(err.message(), "missing data");
    }

    #[test]
    fn test_overflow_log_open_maps_to_system_error() {
        let err = to_rpc_error(AppError::OverflowLogOpen {
            path: "/var/log/overflow.log".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.code(), code::SYSTEM_ERROR);
        assert!(err.message().contains("/var/log/overflow.log"));
    }
}
