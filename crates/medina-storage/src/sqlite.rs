//! # SQLite Storage
//!
//! Durable key-value storage kept in a single SQLite database file.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Storage Layout                              │
//! │                                                                         │
//! │  SqliteStorageConfig::new(path) ← Configure file, quota, busy timeout  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStorage::open(config) ← Creates parent dir and schema           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <dir>/local-storage.sqlite3                                           │
//! │  └── slots (key TEXT PRIMARY KEY, value TEXT)                          │
//! │                                                                         │
//! │  set_item: BEGIN IMMEDIATE ──► quota check ──► upsert ──► COMMIT       │
//! │  Concurrent writers queue on the database lock; the last commit wins.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use crate::area::{validate_key, StorageArea};
use crate::error::{StorageError, StorageResult};

/// File name of the database inside a storage directory.
pub const DEFAULT_DATABASE_NAME: &str = "local-storage.sqlite3";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS slots (
        key   TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    );
";

// =============================================================================
// Configuration
// =============================================================================

/// SQLite storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = SqliteStorageConfig::new("/path/to/local-storage.sqlite3")
///     .quota_bytes(5 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStorageConfig {
    /// Path to the database file. Its parent directory is created on open.
    pub path: PathBuf,

    /// Cap on the total size of all keys plus values.
    /// Default: none
    pub quota_bytes: Option<usize>,

    /// How long a call waits for another connection to release the lock.
    /// Default: 5 seconds
    pub busy_timeout: Duration,
}

impl SqliteStorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStorageConfig {
            path: path.into(),
            quota_bytes: None,
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Sets the byte quota.
    pub fn quota_bytes(mut self, quota: usize) -> Self {
        self.quota_bytes = Some(quota);
        self
    }
}

// =============================================================================
// SQLite Storage
// =============================================================================

/// Key-value storage in one SQLite table.
///
/// Several handles, in this process or another, may point at the same file.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl SqliteStorage {
    /// Opens (and creates if needed) the database.
    pub fn open(config: SqliteStorageConfig) -> StorageResult<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.path)?;
        conn.busy_timeout(config.busy_timeout)?;
        conn.execute_batch(SCHEMA)?;

        info!(path = ?config.path, "SQLite storage opened");

        Ok(SqliteStorage {
            conn: Mutex::new(conn),
            path: config.path,
            quota_bytes: config.quota_bytes,
        })
    }

    /// The database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("path", &self.path)
            .field("quota_bytes", &self.quota_bytes)
            .finish()
    }
}

impl StorageArea for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if !validate_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut conn = self.conn();
        // Take the write lock up front so the quota check and the write see
        // the same table.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(quota) = self.quota_bytes {
            let others: i64 = tx.query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
                 FROM slots WHERE key <> ?1",
                params![key],
                |row| row.get(0),
            )?;
            let required = others.max(0) as usize + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded { required, quota });
            }
        }

        tx.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        tx.commit()?;

        debug!(key = %key, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn()
            .execute("DELETE FROM slots WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.conn().execute("DELETE FROM slots", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_in(dir: &Path) -> SqliteStorage {
        SqliteStorage::open(SqliteStorageConfig::new(dir.join(DEFAULT_DATABASE_NAME))).unwrap()
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(DEFAULT_DATABASE_NAME);

        let storage = SqliteStorage::open(SqliteStorageConfig::new(&path)).unwrap();

        assert!(path.is_file());
        assert_eq!(storage.path(), path.as_path());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = open_in(dir.path());
            storage.set_item("medina-voyages-cart", "[]").unwrap();
        }

        let storage = open_in(dir.path());
        assert_eq!(
            storage.get_item("medina-voyages-cart").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_in(dir.path());

        assert_eq!(storage.get_item("nothing-here").unwrap(), None);
        storage.remove_item("nothing-here").unwrap();
    }

    #[test]
    fn test_set_replaces_and_remove_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_in(dir.path());

        storage.set_item("lang", "fr").unwrap();
        storage.set_item("lang", "ar").unwrap();
        assert_eq!(storage.get_item("lang").unwrap().as_deref(), Some("ar"));

        storage.remove_item("lang").unwrap();
        assert_eq!(storage.get_item("lang").unwrap(), None);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_in(dir.path());

        assert!(matches!(
            storage.set_item("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.set_item("", "x"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_quota() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(
            SqliteStorageConfig::new(dir.path().join(DEFAULT_DATABASE_NAME)).quota_bytes(10),
        )
        .unwrap();

        storage.set_item("a", "12345").unwrap();
        // Rewriting the same slot only counts its new size
        storage.set_item("a", "12345678").unwrap();

        let err = storage.set_item("b", "1").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 11,
                quota: 10
            }
        ));
        assert_eq!(storage.get_item("b").unwrap(), None);
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("12345678"));
    }

    #[test]
    fn test_clear_removes_slots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_in(dir.path());
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        storage.clear().unwrap();

        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.get_item("b").unwrap(), None);
    }

    #[test]
    fn test_concurrent_writers_on_one_database_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let first = open_in(dir.path());
        let second = open_in(dir.path());

        let big_a = format!("[\"{}\"]", "a".repeat(256 * 1024));
        let big_b = format!("[\"{}\"]", "b".repeat(256 * 1024));

        for _ in 0..10 {
            std::thread::scope(|s| {
                let a = s.spawn(|| first.set_item("medina-voyages-cart", &big_a));
                let b = s.spawn(|| second.set_item("medina-voyages-cart", &big_b));
                a.join().unwrap().unwrap();
                b.join().unwrap().unwrap();
            });

            let stored = first.get_item("medina-voyages-cart").unwrap().unwrap();
            assert!(stored == big_a || stored == big_b);
        }
    }
}
