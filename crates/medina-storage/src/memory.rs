//! # In-Memory Storage
//!
//! Keeps slots in a `HashMap`. Nothing survives the process, which makes it
//! the backend for tests and for sessions that must not leave traces.
//!
//! It can also stand in for a misbehaving browser store: a byte quota and a
//! disabled switch make writes fail the same way a full or blocked
//! `localStorage` does.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::area::{validate_key, StorageArea};
use crate::error::{StorageError, StorageResult};

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryStorage {
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the total size of keys plus values.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Makes every subsequent call fail with [`StorageError::Disabled`].
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_enabled(&self) -> StorageResult<()> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StorageError::Disabled);
        }
        Ok(())
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_enabled()?;
        Ok(self.slots().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_enabled()?;
        if !validate_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut slots = self.slots();

        if let Some(quota) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let required = others + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded { required, quota });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.check_enabled()?;
        self.slots().remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.check_enabled()?;
        self.slots().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("lang").unwrap(), None);

        storage.set_item("lang", "fr").unwrap();
        assert_eq!(storage.get_item("lang").unwrap().as_deref(), Some("fr"));

        storage.set_item("lang", "ar").unwrap();
        assert_eq!(storage.get_item("lang").unwrap().as_deref(), Some("ar"));

        storage.remove_item("lang").unwrap();
        assert_eq!(storage.get_item("lang").unwrap(), None);

        // Removing twice is fine
        storage.remove_item("lang").unwrap();
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::new().with_quota(10);

        storage.set_item("k", "123456789").unwrap();

        // Replacing the same key does not double count
        storage.set_item("k", "987654321").unwrap();

        let err = storage.set_item("k", "1234567890").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 11,
                quota: 10
            }
        ));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("987654321"));
    }

    #[test]
    fn test_disabled_storage_fails_every_call() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();

        storage.set_disabled(true);
        assert!(matches!(storage.get_item("k"), Err(StorageError::Disabled)));
        assert!(matches!(storage.set_item("k", "w"), Err(StorageError::Disabled)));

        storage.set_disabled(false);
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.set_item("a/b", "v"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        storage.clear().unwrap();

        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.get_item("b").unwrap(), None);
    }
}
