//! # Site Error Type
//!
//! Errors raised while bringing a session up.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Site Shell                         │
//! │                                                                         │
//! │  Startup (run / start)                  Cart operations                 │
//! │  ─────────────────────                  ───────────────                 │
//! │  ConfigState::load ──► SiteError        add/remove/clear/toggle         │
//! │  SqliteStorage::open ──► SiteError      never return errors:            │
//! │         │                                 • read failure → empty cart   │
//! │         ▼                                 • write failure → warn! only  │
//! │  caller decides (usually abort)                                         │
//! │                                                                         │
//! │  Session::state::<T>() without T managed ──► panic (wiring defect)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medina_storage::StorageError;
use thiserror::Error;

/// Session startup errors.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file exists but could not be read.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(#[from] std::io::Error),

    /// The config file is not valid TOML for `ConfigState`.
    #[error("Failed to parse config: {0}")]
    ConfigParseFailed(#[from] toml::de::Error),

    /// No data directory is configured and the platform has none.
    #[error("Could not determine app data directory")]
    NoDataDirectory,

    /// Opening the durable storage failed.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for site operations.
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SiteError::InvalidConfig("log_filter must not be empty".into()).to_string(),
            "Invalid configuration: log_filter must not be empty"
        );
        assert_eq!(
            SiteError::Storage(StorageError::Disabled).to_string(),
            "Storage unavailable: Storage is disabled"
        );
    }
}
