//! # medina-core: Pure Booking-Cart Logic
//!
//! This crate holds the booking cart of the Medina Voyages site as pure data
//! and pure transitions. Nothing in here touches storage, locks or logging
//! subscribers; the storage layer and the session shell build on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Medina Voyages Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web views (tours, booking pages)                │   │
//! │  │   Tour card ──► "Book" ──► Cart drawer ──► Checkout link        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands::cart                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              medina-site (Session, CartState)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medina-core (THIS CRATE) ★                      │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                   │   │
//! │  │   │   types   │  │   cart    │  │   codec   │                   │   │
//! │  │   │ CartItem  │  │   Cart    │  │ JSON slot │                   │   │
//! │  │   │ ItemType  │  │ LineKey   │  │  format   │                   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                   │   │
//! │  │   NO I/O • NO STORAGE • PURE TRANSITIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              medina-storage (durable key-value slot)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `CartItem`, `ItemType`, `CartSnapshot`
//! - [`cart`] - line identity and the cart transitions
//! - [`codec`] - JSON format of the durable cart slot
//! - [`error`] - codec errors
//!
//! ## Example Usage
//!
//! ```rust
//! use medina_core::{Cart, CartItem, ItemType};
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("10", "Desert Trip", ItemType::Tour).with_guests(2));
//! cart.add_item(CartItem::new("10", "Desert Trip", ItemType::Tour).with_guests(1));
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.items()[0].guests, Some(3));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, LineKey};
pub use error::{CoreError, CoreResult};
pub use types::{CartItem, CartSnapshot, ItemType};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the durable storage slot that holds the cart lines.
///
/// Scoped to this site so it never collides with other data kept in the same
/// browser profile or data directory.
pub const CART_STORAGE_KEY: &str = "medina-voyages-cart";
