//! # Cart State
//!
//! The session's booking cart: single source of truth for what the visitor
//! has selected, mirrored to durable storage after every change.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action              CartState               Effect                │
//! │  ───────────              ─────────               ──────                │
//! │                                                                         │
//! │  Click "Book" ───────────► add_item() ──────────► merge/append, open   │
//! │                                                   save, publish         │
//! │                                                                         │
//! │  Click trash icon ───────► remove_item() ───────► drop lines by id     │
//! │                                                   save, publish         │
//! │                                                                         │
//! │  Click "Empty cart" ─────► clear_cart() ────────► items = []           │
//! │                                                   save, publish         │
//! │                                                                         │
//! │  Click cart badge ───────► toggle_cart() ───────► flip drawer          │
//! │                                                   publish (not saved)   │
//! │                                                                         │
//! │  NOTE: every operation runs to completion under one Mutex; snapshots   │
//! │        are published while the lock is held so views see them in order │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hydration
//! ```text
//!   CartState::new ──► Initializing ──hydrate()──► Ready
//!                      (empty, closed,             (durable lines,
//!                       mutations ignored)          closed)
//! ```
//! The transition is one-way. Ignoring mutations while initializing keeps an
//! early click from overwriting the durable copy before it has been read.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use medina_core::{AddOutcome, Cart, CartItem, CartSnapshot};
use medina_storage::CartSlot;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Whether the durable copy has been read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationPhase {
    Initializing,
    Ready,
}

#[derive(Debug)]
struct CartStore {
    phase: HydrationPhase,
    cart: Cart,
    is_open: bool,
}

impl CartStore {
    fn snapshot(&self) -> CartSnapshot {
        match self.phase {
            HydrationPhase::Initializing => CartSnapshot::default(),
            HydrationPhase::Ready => CartSnapshot {
                items: self.cart.items().to_vec(),
                cart_total: self.cart.item_count(),
                is_open: self.is_open,
                hydrated: true,
            },
        }
    }
}

/// Session-managed cart state.
///
/// ## Thread Safety
/// `Arc<Mutex<_>>` serializes every operation. Reads take the lock too but
/// release it right after copying what they need.
#[derive(Debug)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
    slot: CartSlot,
    updates: watch::Sender<CartSnapshot>,
}

impl CartState {
    /// Creates the cart in the `Initializing` phase. Nothing is read yet.
    pub fn new(slot: CartSlot) -> Self {
        let (updates, _) = watch::channel(CartSnapshot::default());
        CartState {
            store: Arc::new(Mutex::new(CartStore {
                phase: HydrationPhase::Initializing,
                cart: Cart::new(),
                is_open: false,
            })),
            slot,
            updates,
        }
    }

    /// Reads the durable copy and switches to `Ready`.
    ///
    /// Returns `false` if the cart was already hydrated; the durable copy is
    /// not read again.
    pub fn hydrate(&self) -> bool {
        let mut store = self.lock();
        if store.phase == HydrationPhase::Ready {
            debug!("Cart already hydrated");
            return false;
        }

        store.cart = self.slot.load();
        store.is_open = false;
        store.phase = HydrationPhase::Ready;

        info!(lines = store.cart.item_count(), "Cart hydrated");
        self.publish(&store);
        true
    }

    /// Adds an item and opens the cart drawer.
    ///
    /// ## Behavior
    /// - Same `(id, date)` already in the cart: guests are summed
    /// - Otherwise: appended as a new line
    /// - The drawer is opened either way
    pub fn add_item(&self, item: CartItem) -> CartSnapshot {
        self.mutate("add_item", |store| {
            let id = item.id.clone();
            match store.cart.add_item(item) {
                AddOutcome::Merged { index, guests } => {
                    debug!(id = %id, index, guests, "Merged into existing line");
                }
                AddOutcome::Appended { index } => {
                    debug!(id = %id, index, "Appended new line");
                }
            }
            store.is_open = true;
            true
        })
    }

    /// Removes every line with this id, whatever its date.
    pub fn remove_item(&self, id: &str) -> CartSnapshot {
        self.mutate("remove_item", |store| {
            let removed = store.cart.remove_item(id);
            debug!(id = %id, removed, "Removed lines");
            removed > 0
        })
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> CartSnapshot {
        self.mutate("clear_cart", |store| {
            store.cart.clear();
            true
        })
    }

    /// Opens or closes the drawer. Never written to storage.
    pub fn toggle_cart(&self) -> CartSnapshot {
        self.mutate("toggle_cart", |store| {
            store.is_open = !store.is_open;
            debug!(is_open = store.is_open, "Cart toggled");
            false
        })
    }

    /// The lines in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().snapshot().items
    }

    /// Number of lines, recomputed on every call.
    pub fn cart_total(&self) -> usize {
        let store = self.lock();
        match store.phase {
            HydrationPhase::Initializing => 0,
            HydrationPhase::Ready => store.cart.item_count(),
        }
    }

    pub fn is_open(&self) -> bool {
        let store = self.lock();
        store.phase == HydrationPhase::Ready && store.is_open
    }

    pub fn phase(&self) -> HydrationPhase {
        self.lock().phase
    }

    /// Everything a view renders, read atomically.
    pub fn snapshot(&self) -> CartSnapshot {
        self.lock().snapshot()
    }

    /// Subscribes to snapshots published after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.updates.subscribe()
    }

    /// Runs one operation under the lock.
    ///
    /// `op` returns whether the lines changed and must be written back.
    /// While initializing, the operation is skipped and the inert snapshot
    /// returned.
    fn mutate<F>(&self, name: &'static str, op: F) -> CartSnapshot
    where
        F: FnOnce(&mut CartStore) -> bool,
    {
        let mut store = self.lock();
        if store.phase == HydrationPhase::Initializing {
            debug!(operation = name, "Cart not hydrated yet, ignoring");
            return store.snapshot();
        }

        if op(&mut *store) {
            self.persist(&store);
        }
        self.publish(&store)
    }

    /// Best-effort write. A failure leaves memory authoritative.
    fn persist(&self, store: &CartStore) {
        if let Err(e) = self.slot.save(store.cart.items()) {
            warn!(key = %self.slot.key(), error = %e, "Failed to persist cart");
        }
    }

    fn publish(&self, store: &CartStore) -> CartSnapshot {
        let snapshot = store.snapshot();
        self.updates.send_replace(snapshot.clone());
        snapshot
    }

    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
