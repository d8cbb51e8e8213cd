//! Storage-specific error types for the JSON ledger file.
//!
//! These are internal to the storage layer and converted to
//! `stockfolio_core::Error` before being returned to callers.

use stockfolio_core::errors::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Ledger file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid ledger record: {0}")]
    InvalidRecord(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Repository(e.to_string()),
            StorageError::Serialization(e) => Error::Repository(e.to_string()),
            StorageError::InvalidRecord(e) => Error::MalformedLedger(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_core_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(matches!(
            Error::from(StorageError::from(io)),
            Error::Repository(_)
        ));
        assert!(matches!(
            Error::from(StorageError::InvalidRecord("bad".to_string())),
            Error::MalformedLedger(_)
        ));
    }
}
