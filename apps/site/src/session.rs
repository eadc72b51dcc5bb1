//! # Session
//!
//! One `Session` exists per application session (page load to close or
//! reload). It owns the managed state objects and is passed by reference to
//! every view that needs them, so nothing reaches the cart through a global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Session                                        │
//! │                                                                         │
//! │  session.manage(cart_state);     ◄── once, at startup                  │
//! │  session.manage(config_state);                                          │
//! │                                                                         │
//! │  session.state::<CartState>()    ◄── from any view                     │
//! │       │                                                                 │
//! │       ├── managed ──────► &CartState                                    │
//! │       └── not managed ──► panic: the view was wired outside a session  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Typed registry of session-wide state.
#[derive(Default)]
pub struct Session {
    states: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a state object.
    ///
    /// Returns `false` and keeps the existing value when a state of the same
    /// type is already managed.
    pub fn manage<T>(&mut self, state: T) -> bool
    where
        T: Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        if self.states.contains_key(&type_id) {
            return false;
        }
        self.states.insert(type_id, Box::new(state));
        true
    }

    /// Returns the managed state of type `T`.
    ///
    /// # Panics
    /// When no `T` was managed. Reaching for the cart outside a session is a
    /// wiring defect, not a runtime condition, so it fails loudly.
    pub fn state<T>(&self) -> &T
    where
        T: Send + Sync + 'static,
    {
        match self.try_state::<T>() {
            Some(state) => state,
            None => panic!(
                "state `{}` is not managed by this session; call `Session::manage` at startup",
                type_name::<T>()
            ),
        }
    }

    /// Returns the managed state of type `T`, if any.
    pub fn try_state<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.downcast_ref::<T>())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("managed", &self.states.len())
            .finish()
    }
}
