//! # Domain Types
//!
//! Types shared by the cart, the storage layer and the web views.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │    ItemType     │   │  CartSnapshot   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Tour           │   │  items          │       │
//! │  │  title          │   │  Experience     │   │  cart_total     │       │
//! │  │  type           │   │  Activity       │   │  is_open        │       │
//! │  │  date?  guests? │   │  Service        │   │  hydrated       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Items are stored and handed to the views as camelCase JSON. Absent optional
//! fields are omitted, and the category sits under the `"type"` key:
//! ```json
//! { "id": "10", "title": "Desert Trip", "type": "tour", "guests": 2 }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Item Type
// =============================================================================

/// Category of a bookable product.
///
/// Product ids are only unique inside a category (tour "3" and activity "3"
/// are different products), so every cart line carries its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Tour,
    Experience,
    Activity,
    Service,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Tour => write!(f, "tour"),
            ItemType::Experience => write!(f, "experience"),
            ItemType::Activity => write!(f, "activity"),
            ItemType::Service => write!(f, "service"),
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A bookable product selected by the visitor.
///
/// ## Design Notes
/// - No field is validated. An empty `id` or `title` is stored as given and
///   the views simply show a blank.
/// - `price` is a display string ("1 200 MAD"); no arithmetic is done on it.
/// - `date` takes part in line identity, see [`crate::cart::LineKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier within its category.
    #[serde(default)]
    pub id: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Product category.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Display price, opaque to the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<String>,

    /// Booking date as entered by the visitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub date: Option<String>,

    /// Number of guests. Accumulates when the same line is added again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub guests: Option<u32>,

    /// Image URL for the cart drawer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,

    /// Link back to the product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub url: Option<String>,
}

impl CartItem {
    /// Creates an item with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, item_type: ItemType) -> Self {
        CartItem {
            id: id.into(),
            title: title.into(),
            item_type,
            price: None,
            date: None,
            guests: None,
            image: None,
            url: None,
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_guests(mut self, guests: u32) -> Self {
        self.guests = Some(guests);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Everything a view needs to render the cart, captured at one instant.
///
/// Snapshots are published as a whole after every committed change, so a
/// view never sees items from one state next to a count from another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart lines in insertion order.
    pub items: Vec<CartItem>,

    /// Number of lines (not the sum of guests). Drives the badge counter.
    pub cart_total: usize,

    /// Whether the cart drawer is shown.
    pub is_open: bool,

    /// False until the durable copy has been read.
    pub hydrated: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
