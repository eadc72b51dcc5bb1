//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  rusqlite::Error / std::io::Error / CoreError                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartState logs it and carries on (writes are best-effort)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medina_core::CoreError;
use thiserror::Error;

/// Durable storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database rejected a statement or could not be opened.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the storage directory failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the value would push the store past its byte quota.
    ///
    /// ## When This Occurs
    /// - A very large cart on a store configured with a small quota
    /// - Mirrors the browser's `QuotaExceededError`
    #[error("Storage quota exceeded: {required} bytes needed, quota is {quota}")]
    QuotaExceeded { required: usize, quota: usize },

    /// Storage is switched off for this session.
    #[error("Storage is disabled")]
    Disabled,

    /// The key cannot be mapped to a slot.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The slot content could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CoreError),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::QuotaExceeded {
            required: 120,
            quota: 100,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: 120 bytes needed, quota is 100"
        );
        assert_eq!(
            StorageError::InvalidKey("../etc".into()).to_string(),
            "Invalid storage key: '../etc'"
        );
    }
}
