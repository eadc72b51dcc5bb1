//! # Storage Area
//!
//! A synchronous string key-value store, shaped like the browser's
//! `localStorage`. Every call runs to completion before returning.

use crate::error::StorageResult;

/// A key-value storage backend.
///
/// Implementations must be shareable across threads since the session shell
/// keeps one behind an `Arc` for the lifetime of the session.
pub trait StorageArea: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, or `None` when the slot is empty.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Removes every key.
    fn clear(&self) -> StorageResult<()>;
}

/// Checks that a key can name a slot on any backend.
///
/// Keys are limited to `[A-Za-z0-9._-]`, must not be empty and must not
/// start with a dot.
pub(crate) fn validate_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
