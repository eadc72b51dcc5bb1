//! # Cart Slot Codec
//!
//! The durable slot holds the cart lines and nothing else, as a plain JSON
//! array:
//!
//! ```json
//! [
//!   { "id": "10", "title": "Desert Trip", "type": "tour", "guests": 2 },
//!   { "id": "4", "title": "Cooking Class", "type": "experience", "date": "2026-11-02" }
//! ]
//! ```
//!
//! The drawer visibility flag is never written.

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::CartItem;

/// Encodes cart lines into the slot format.
pub fn encode_items(items: &[CartItem]) -> CoreResult<String> {
    serde_json::to_string(items).map_err(CoreError::Encode)
}

/// Decodes the slot format back into cart lines, order preserved.
pub fn decode_items(raw: &str) -> CoreResult<Vec<CartItem>> {
    serde_json::from_str(raw).map_err(CoreError::Decode)
}

/// Decodes a slot into a [`Cart`].
pub fn decode_cart(raw: &str) -> CoreResult<Cart> {
    decode_items(raw).map(Cart::from_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemType;

    #[test]
    fn test_round_trip_preserves_order() {
        let items = vec![
            CartItem::new("10", "Desert Trip", ItemType::Tour).with_guests(2),
            CartItem::new("4", "Cooking Class", ItemType::Experience)
                .with_date("2026-11-02")
                .with_price("450 MAD"),
            CartItem::new("2", "Airport Transfer", ItemType::Service)
                .with_image("/img/transfer.jpg")
                .with_url("/services/2"),
        ];

        let raw = encode_items(&items).unwrap();
        let decoded = decode_items(&raw).unwrap();

        assert_eq!(decoded, items);
    }

    #[test]
    fn test_slot_is_a_plain_array() {
        let raw = encode_items(&[CartItem::new("1", "Quad Ride", ItemType::Activity)]).unwrap();

        assert_eq!(raw, r#"[{"id":"1","title":"Quad Ride","type":"activity"}]"#);
    }

    #[test]
    fn test_empty_slot_round_trip() {
        let raw = encode_items(&[]).unwrap();

        assert_eq!(raw, "[]");
        assert!(decode_items(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = decode_items("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn test_unknown_type_is_decode_error() {
        let err = decode_items(r#"[{"id":"1","title":"x","type":"cruise"}]"#).unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn test_decode_cart() {
        let cart = decode_cart(r#"[{"id":"10","title":"Desert Trip","type":"tour"}]"#).unwrap();
        assert_eq!(cart.item_count(), 1);
    }
}
