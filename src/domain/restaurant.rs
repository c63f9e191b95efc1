//! Restaurant records and order receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A restaurant row from the `restaurants` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Store-assigned identity.
    pub id: i64,
    /// Restaurant name.
    pub name: String,
    /// Cuisine text used for filtered listings.
    pub cuisine: String,
    /// City or area text.
    pub location: String,
    /// Guest rating in `[0, 5]`.
    pub rating: f64,
    /// Typical delivery time in minutes; strictly positive.
    pub delivery_time: i64,
    /// Free-form menu text.
    pub menu: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A single line item in an order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item name as shown on the menu.
    #[serde(default)]
    pub name: String,
    /// Unit price; missing prices count as zero in the estimate.
    #[serde(default)]
    pub price: f64,
    /// Quantity ordered; missing quantities count as one.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Receipt for a placed order.
///
/// Orders are estimation-only and never persisted; the `reference` exists
/// for client-side correlation.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    /// Client-facing order reference.
    pub reference: Uuid,
    /// Restaurant the order was placed with.
    pub restaurant_id: i64,
    /// Restaurant display name.
    pub restaurant_name: String,
    /// Ordered items, echoed back.
    pub items: Vec<OrderItem>,
    /// Free-form instructions, echoed back.
    pub special_instructions: String,
    /// Sum of `price * quantity` over all items.
    pub estimated_total: f64,
    /// Now plus the restaurant's delivery time.
    pub estimated_delivery: DateTime<Utc>,
    /// Always `"confirmed"`.
    pub status: String,
}
