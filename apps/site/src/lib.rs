//! # Medina Site Library
//!
//! Session shell of the Medina Voyages booking site. It wires configuration,
//! logging, durable storage and the booking cart into a [`Session`] that the
//! web views receive at startup.
//!
//! ## Module Organization
//! ```text
//! medina_site_lib/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── session.rs      ◄─── Typed state registry
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state, hydration, snapshots
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands for the views
//! └── error.rs        ◄─── Startup error type
//! ```

pub mod commands;
pub mod error;
pub mod session;
pub mod state;

use std::sync::Arc;

use medina_storage::{
    CartSlot, MemoryStorage, SqliteStorage, SqliteStorageConfig, StorageArea, DEFAULT_DATABASE_NAME,
};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

pub use error::{SiteError, SiteResult};
pub use session::Session;
use state::{CartState, ConfigState, StorageBackend};

/// Installs logging, loads configuration and starts a session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG if set, otherwise the default filter                     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • site.toml, then MEDINA_* overrides                                │
/// │     • without RUST_LOG, switch to config.log_filter                     │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/medina-voyages/storage/local-storage.sqlite3│
/// │     • or in-memory when storage.backend = "memory"                      │
/// │                                                                         │
/// │  4. Manage State ─────────────────────────────────────────────────────► │
/// │     • CartState (Initializing), ConfigState                             │
/// │                                                                         │
/// │  5. Hydrate Cart ─────────────────────────────────────────────────────► │
/// │     • Read the durable slot, switch to Ready                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> SiteResult<Session> {
    let log = init_tracing(&ConfigState::default().log_filter);

    let config = ConfigState::load_or_default(None);
    if let Some(log) = &log {
        if std::env::var_os("RUST_LOG").is_none() {
            apply_log_filter(log, &config.log_filter);
        }
    }

    info!("Starting Medina Voyages session");
    start(config)
}

/// Builds and hydrates a session from an already loaded configuration.
pub fn start(config: ConfigState) -> SiteResult<Session> {
    let storage = open_storage(&config)?;

    let cart_state = CartState::new(CartSlot::new(storage));

    let mut session = Session::new();
    session.manage(config);
    session.manage(cart_state);

    session.state::<CartState>().hydrate();

    info!("Session ready");
    Ok(session)
}

/// Opens the storage backend named by the configuration.
pub fn open_storage(config: &ConfigState) -> SiteResult<Arc<dyn StorageArea>> {
    let settings = &config.storage;

    let storage: Arc<dyn StorageArea> = match settings.backend {
        StorageBackend::Sqlite => {
            let path = config.storage_directory()?.join(DEFAULT_DATABASE_NAME);
            let mut sqlite_config = SqliteStorageConfig::new(path);
            if let Some(quota) = settings.quota_bytes {
                sqlite_config = sqlite_config.quota_bytes(quota);
            }
            Arc::new(SqliteStorage::open(sqlite_config)?)
        }
        StorageBackend::Memory => {
            let mut memory = MemoryStorage::new();
            if let Some(quota) = settings.quota_bytes {
                memory = memory.with_quota(quota);
            }
            Arc::new(memory)
        }
    };

    info!(backend = %settings.backend, "Storage opened");
    Ok(storage)
}

/// Handle for swapping the log filter of an installed subscriber.
pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=medina=trace` - Show trace for medina crates only
/// - Default: `filter`
///
/// Returns `None` when a subscriber was already installed; that one stays.
pub fn init_tracing(filter: &str) -> Option<LogHandle> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .ok()
        .map(|_| handle)
}

/// Replaces the filter of the subscriber behind `handle`.
pub fn apply_log_filter(handle: &LogHandle, filter: &str) {
    if let Err(e) = handle.reload(EnvFilter::new(filter)) {
        warn!(filter = %filter, error = %e, "Failed to apply log filter");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::StorageSettings;

    fn memory_config() -> ConfigState {
        ConfigState {
            storage: StorageSettings {
                backend: StorageBackend::Memory,
                ..StorageSettings::default()
            },
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_start_returns_hydrated_session() {
        let session = start(memory_config()).unwrap();

        let cart = session.state::<CartState>();
        assert_eq!(cart.phase(), state::HydrationPhase::Ready);
        assert_eq!(cart.cart_total(), 0);
        assert!(!cart.is_open());
        assert_eq!(
            session.state::<ConfigState>().storage.backend,
            StorageBackend::Memory
        );
    }

    #[test]
    fn test_start_with_sqlite_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigState::default();
        config.storage.data_dir = Some(dir.path().join("storage"));

        let session = start(config).unwrap();

        assert!(dir
            .path()
            .join("storage")
            .join(DEFAULT_DATABASE_NAME)
            .is_file());
        assert!(session.state::<CartState>().snapshot().hydrated);
    }

    #[test]
    fn test_init_tracing_twice_keeps_first_subscriber() {
        let _ = init_tracing("info");
        assert!(init_tracing("debug").is_none());
    }

    #[test]
    fn test_apply_log_filter_swaps_filter() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("info"));
        let _subscriber = tracing_subscriber::registry().with(layer);

        apply_log_filter(&handle, "warn,medina=trace");

        let current = handle.with_current(|filter| filter.to_string()).unwrap();
        assert!(current.contains("medina=trace"));
    }
}
