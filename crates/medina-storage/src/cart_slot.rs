//! # Cart Slot
//!
//! Persistence adapter for the booking cart: binds a [`StorageArea`] to the
//! cart key and speaks the slot format from [`medina_core::codec`].
//!
//! ## Read Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │                                                                         │
//! │  slot absent ─────────────────────────────► []                          │
//! │  slot holds a JSON array of items ────────► items (order kept)          │
//! │  slot corrupt / storage unreadable ───────► [] + warn!                  │
//! │                                                                         │
//! │  load() never fails. try_load() exposes the underlying error.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use medina_core::codec::{decode_cart, encode_items};
use medina_core::{Cart, CartItem, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::area::StorageArea;
use crate::error::StorageResult;

/// The durable home of the cart lines.
#[derive(Debug, Clone)]
pub struct CartSlot {
    storage: Arc<dyn StorageArea>,
    key: String,
}

impl CartSlot {
    /// Binds the cart slot under [`CART_STORAGE_KEY`].
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Binds the cart slot under a different key.
    pub fn with_key(storage: Arc<dyn StorageArea>, key: impl Into<String>) -> Self {
        CartSlot {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored cart. `Ok(None)` when nothing was ever saved.
    pub fn try_load(&self) -> StorageResult<Option<Cart>> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(Some(decode_cart(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reads the stored cart, falling back to an empty one on any failure.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => {
                debug!(key = %self.key, lines = cart.item_count(), "Cart slot loaded");
                cart
            }
            Ok(None) => {
                debug!(key = %self.key, "Cart slot empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart slot unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Writes the lines, replacing the previous slot content.
    pub fn save(&self, items: &[CartItem]) -> StorageResult<()> {
        let raw = encode_items(items)?;
        self.storage.set_item(&self.key, &raw)
    }
}
