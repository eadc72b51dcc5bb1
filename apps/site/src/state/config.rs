//! # Configuration State
//!
//! Site configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MEDINA_STORAGE_BACKEND=memory                                      │
//! │     MEDINA_DATA_DIR=/srv/medina                                        │
//! │     MEDINA_STORAGE_QUOTA=5242880                                       │
//! │     MEDINA_LOG=debug                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/medina-voyages/site.toml (Linux)                         │
//! │     ~/Library/Application Support/ma.medina.medina-voyages/site.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite storage in the platform data dir, 5 MiB quota               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! log_filter = "info,medina=debug"
//!
//! [storage]
//! backend = "sqlite"        # sqlite | memory
//! data_dir = "/srv/medina"  # optional
//! quota_bytes = 5242880     # optional
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SiteError, SiteResult};

const CONFIG_FILE_NAME: &str = "site.toml";
const STORAGE_DIR_NAME: &str = "storage";

// =============================================================================
// Storage Backend
// =============================================================================

/// Where the durable cart slot lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite database under the data directory.
    #[default]
    #[serde(alias = "file")]
    Sqlite,

    /// Process memory only; the cart does not survive a restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "file" | "disk" => Ok(StorageBackend::Sqlite),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(SiteError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Durable storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the database. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Cap on stored bytes, like a browser's storage quota.
    #[serde(default = "default_quota")]
    pub quota_bytes: Option<usize>,
}

fn default_quota() -> Option<usize> {
    Some(5 * 1024 * 1024)
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            data_dir: None,
            quota_bytes: default_quota(),
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub storage: StorageSettings,
}

fn default_log_filter() -> String {
    "info,medina=debug".to_string()
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            log_filter: default_log_filter(),
            storage: StorageSettings::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (site.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SiteResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading site config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load site config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SiteResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(SiteError::InvalidConfig(
                "log_filter must not be empty".into(),
            ));
        }

        if self.storage.quota_bytes == Some(0) {
            return Err(SiteError::InvalidConfig(
                "storage.quota_bytes must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `MEDINA_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("MEDINA_STORAGE_BACKEND") {
            match backend.parse::<StorageBackend>() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        if let Some(dir) = lookup("MEDINA_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(quota) = lookup("MEDINA_STORAGE_QUOTA") {
            match quota.parse::<usize>() {
                Ok(q) => self.storage.quota_bytes = Some(q),
                Err(_) => warn!(quota = %quota, "Invalid storage quota in environment"),
            }
        }

        if let Some(filter) = lookup("MEDINA_LOG") {
            self.log_filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ma", "medina", "medina-voyages")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory the SQLite backend keeps its database in.
    pub fn storage_directory(&self) -> SiteResult<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        directories::ProjectDirs::from("ma", "medina", "medina-voyages")
            .map(|dirs| dirs.data_dir().join(STORAGE_DIR_NAME))
            .ok_or(SiteError::NoDataDirectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("cloud".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ConfigState::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.quota_bytes, Some(5 * 1024 * 1024));
        assert_eq!(config.log_filter, "info,medina=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota_bytes, Some(5 * 1024 * 1024));
        assert_eq!(config.log_filter, "info,medina=debug");
    }

    #[test]
    fn test_legacy_file_backend_name_reads_as_sqlite() {
        let config: ConfigState = toml::from_str(
            r#"
            [storage]
            backend = "file"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(
            &path,
            r#"
            log_filter = "warn"

            [storage]
            data_dir = "/srv/medina"
            quota_bytes = 1024
            "#,
        )
        .unwrap();

        let config = ConfigState::load(Some(path)).unwrap();

        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.storage.quota_bytes, Some(1024));
        assert_eq!(
            config.storage_directory().unwrap(),
            PathBuf::from("/srv/medina")
        );
    }

    #[test]
    fn test_invalid_toml_fails_load_but_not_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[storage\nbackend = ").unwrap();

        assert!(matches!(
            ConfigState::load(Some(path.clone())),
            Err(SiteError::ConfigParseFailed(_))
        ));
        assert_eq!(ConfigState::load_or_default(Some(path)), ConfigState::default());
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("MEDINA_STORAGE_BACKEND", "memory"),
            ("MEDINA_DATA_DIR", "/tmp/medina"),
            ("MEDINA_STORAGE_QUOTA", "2048"),
            ("MEDINA_LOG", "trace"),
        ]);
        let mut config = ConfigState::default();

        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/medina")));
        assert_eq!(config.storage.quota_bytes, Some(2048));
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let vars = env(&[
            ("MEDINA_STORAGE_BACKEND", "cloud"),
            ("MEDINA_STORAGE_QUOTA", "lots"),
        ]);
        let mut config = ConfigState::default();

        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        config.log_filter = "  ".into();
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.storage.quota_bytes = Some(0);
        assert!(config.validate().is_err());

        config.storage.quota_bytes = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = ConfigState::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("log_filter"));
    }
}
