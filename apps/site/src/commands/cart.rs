//! # Cart Commands
//!
//! The cart surface offered to the views: read the cart, add, remove,
//! clear, toggle the drawer. Nothing else.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                         │
//! │  │  Cart    │     │ (drawer) │     │  link    │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   remove_from_cart                                      │
//! │                   toggle_cart                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medina_core::{CartItem, CartSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::Session;
use crate::state::CartState;

/// Cart response returned by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub cart_total: usize,
    pub is_open: bool,
    pub hydrated: bool,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            items: snapshot.items,
            cart_total: snapshot.cart_total,
            is_open: snapshot.is_open,
            hydrated: snapshot.hydrated,
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart drawer                                              2 items      │
/// │  ─────────────────────────────────────────────────────────────────     │
/// │  Merzouga Desert Trip     2 guests     2026-11-02      1 200 MAD       │
/// │  Fes Cooking Class        1 guest                        450 MAD       │
/// │                                                                         │
/// │  get_cart(&session) → { items: [...], cartTotal: 2, isOpen: true }     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    cart(session).snapshot().into()
}

/// Adds a product to the cart and opens the drawer.
///
/// ## Behavior
/// - Same product and date already in cart: guests are summed
/// - Otherwise: added as a new line
pub fn add_to_cart(session: &Session, item: CartItem) -> CartResponse {
    debug!(id = %item.id, item_type = %item.item_type, "add_to_cart command");
    cart(session).add_item(item).into()
}

/// Removes every line of a product, whatever the date.
pub fn remove_from_cart(session: &Session, id: &str) -> CartResponse {
    debug!(id = %id, "remove_from_cart command");
    cart(session).remove_item(id).into()
}

/// Clears all items from the cart.
///
/// ## When Used
/// - Visitor empties the cart
/// - After the booking request was handed off
pub fn clear_cart(session: &Session) -> CartResponse {
    debug!("clear_cart command");
    cart(session).clear_cart().into()
}

/// Opens or closes the cart drawer.
pub fn toggle_cart(session: &Session) -> CartResponse {
    debug!("toggle_cart command");
    cart(session).toggle_cart().into()
}

fn cart(session: &Session) -> &CartState {
    session.state::<CartState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medina_core::ItemType;
    use medina_storage::{CartSlot, MemoryStorage};
    use std::sync::Arc;

    fn session() -> Session {
        let cart = CartState::new(CartSlot::new(Arc::new(MemoryStorage::new())));
        cart.hydrate();
        let mut session = Session::new();
        session.manage(cart);
        session
    }

    #[test]
    fn test_command_round() {
        let session = session();

        let response = add_to_cart(
            &session,
            CartItem::new("10", "Desert Trip", ItemType::Tour).with_guests(2),
        );
        assert_eq!(response.cart_total, 1);
        assert!(response.is_open);

        add_to_cart(&session, CartItem::new("20", "Atlas Trek", ItemType::Tour));
        let response = toggle_cart(&session);
        assert!(!response.is_open);
        assert_eq!(response.cart_total, 2);

        let response = remove_from_cart(&session, "10");
        assert_eq!(response.cart_total, 1);
        assert_eq!(response.items[0].id, "20");

        let response = clear_cart(&session);
        assert_eq!(response.cart_total, 0);
        assert_eq!(get_cart(&session), response);
    }

    #[test]
    fn test_response_json_shape() {
        let session = session();
        let response = add_to_cart(&session, CartItem::new("10", "Desert Trip", ItemType::Tour));

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["cartTotal"], 1);
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["items"][0]["type"], "tour");
    }

    #[test]
    #[should_panic(expected = "is not managed by this session")]
    fn test_commands_outside_session_fail_loudly() {
        let session = Session::new();
        get_cart(&session);
    }
}
