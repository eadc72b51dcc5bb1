//! # Cart
//!
//! The cart lines and the pure transitions over them.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Same line?  key = (id, date)                         │
//! │                                                                         │
//! │  ("10", None)          + ("10", None)          → merge, guests summed   │
//! │  ("10", "2026-11-02")  + ("10", "2026-11-02")  → merge, guests summed   │
//! │  ("10", "2026-11-02")  + ("10", "2026-11-09")  → two lines              │
//! │  ("10", None)          + ("10", "2026-11-02")  → two lines              │
//! │                                                                         │
//! │  remove_item("10") drops EVERY line with id "10", whatever the date.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The add side keys on `(id, date)` while the remove side keys on `id` only.
//! Both behaviours are kept as the site has always shipped them.
//!
//! Nothing in this module persists or publishes anything; the session shell
//! runs a transition here, then hands the resulting lines to the storage
//! adapter.

use crate::types::CartItem;

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineKey<'a> {
    pub id: &'a str,
    pub date: Option<&'a str>,
}

impl<'a> LineKey<'a> {
    pub fn of(item: &'a CartItem) -> Self {
        LineKey {
            id: &item.id,
            date: item.date.as_deref(),
        }
    }
}

// =============================================================================
// Add Outcome
// =============================================================================

/// What [`Cart::add_item`] did with the incoming item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Guests were folded into the existing line at `index`.
    Merged { index: usize, guests: u32 },

    /// A new line was appended at `index`.
    Appended { index: usize },
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered cart lines.
///
/// ## Invariants
/// - Lines are unique by [`LineKey`]
/// - Insertion order is preserved; merges never move a line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from lines read back from storage, as-is.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Adds an item, merging it into the line with the same key if any.
    ///
    /// ## Behavior
    /// - Same `(id, date)` already present: the line's guests become
    ///   `existing + incoming`, absent counting as 0 on both sides. Every
    ///   other field of the incoming item is discarded.
    /// - Otherwise the item is appended at the end.
    pub fn add_item(&mut self, item: CartItem) -> AddOutcome {
        let key = LineKey::of(&item);

        if let Some(index) = self.items.iter().position(|line| LineKey::of(line) == key) {
            let line = &mut self.items[index];
            let guests = line
                .guests
                .unwrap_or(0)
                .saturating_add(item.guests.unwrap_or(0));
            line.guests = Some(guests);
            return AddOutcome::Merged { index, guests };
        }

        self.items.push(item);
        AddOutcome::Appended {
            index: self.items.len() - 1,
        }
    }

    /// Removes every line whose id matches, regardless of date.
    ///
    /// Returns how many lines were dropped; 0 is not an error.
    pub fn remove_item(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        before - self.items.len()
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines. This is what the badge shows, not the guest sum.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
