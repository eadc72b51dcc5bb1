//! # State Module
//!
//! State objects managed on the [`Session`](crate::session::Session).
//!
//! ## Why Multiple State Types?
//! Each view asks the session for exactly the state it needs. The cart
//! drawer never touches configuration and the settings page never locks the
//! cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Session                                  │   │
//! │  │  session.manage(cart_state);                                    │   │
//! │  │  session.manage(config_state);                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                     │                          │                        │
//! │                     ▼                          ▼                        │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────┐        │
//! │  │  CartState                   │  │   ConfigState            │        │
//! │  │  Arc<Mutex<CartStore>>       │  │   storage backend        │        │
//! │  │  watch::Sender<CartSnapshot> │  │   data dir, log filter   │        │
//! │  │  CartSlot (durable copy)     │  │                          │        │
//! │  └──────────────────────────────┘  └──────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: every operation runs under one Mutex                     │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartState, HydrationPhase};
pub use config::{ConfigState, StorageBackend, StorageSettings};
