//! # medina-storage: Durable Key-Value Storage
//!
//! The booking cart survives page reloads by living in a single named slot
//! of a key-value store. This crate provides that store and the adapter that
//! reads and writes the cart slot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Medina Voyages Data Flow                         │
//! │                                                                         │
//! │  CartState::add_item (medina-site)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  medina-storage (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartSlot    │    │  StorageArea  │    │SqliteStorage │  │   │
//! │  │   │ (cart_slot.rs)│───►│   (area.rs)   │◄───│ MemoryStorage│  │   │
//! │  │   │ encode/decode │    │ get/set/remove│    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/medina-voyages/storage/local-storage.sqlite3           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`area`] - The `StorageArea` trait
//! - [`memory`] - In-memory backend (tests, private sessions)
//! - [`sqlite`] - SQLite-backed durable backend
//! - [`cart_slot`] - The cart persistence adapter
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use medina_core::{CartItem, ItemType};
//! use medina_storage::{CartSlot, MemoryStorage};
//!
//! let slot = CartSlot::new(Arc::new(MemoryStorage::new()));
//! slot.save(&[CartItem::new("10", "Desert Trip", ItemType::Tour)]).unwrap();
//!
//! assert_eq!(slot.load().item_count(), 1);
//! ```

pub mod area;
pub mod cart_slot;
pub mod error;
pub mod memory;
pub mod sqlite;

pub use area::StorageArea;
pub use cart_slot::CartSlot;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, SqliteStorageConfig, DEFAULT_DATABASE_NAME};
