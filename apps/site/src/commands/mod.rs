//! # Commands Module
//!
//! Everything the web views may call. Views hold a `&Session` and never
//! touch `CartState` internals directly.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── Cart reads and mutations
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View (tour page "Book" button)                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&session, item)                            │
//! │         │                                                               │
//! │         ├── session.state::<CartState>()  ◄── panics if not managed    │
//! │         ▼                                                               │
//! │  CartState::add_item ──► CartResponse (items, cartTotal, isOpen)        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Every other subscribed view gets the same snapshot via watch          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
