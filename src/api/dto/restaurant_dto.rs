//! Restaurant-related DTOs for catalog and ordering operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{OrderItem, OrderReceipt, Restaurant};
use crate::store::{NewRestaurant, RestaurantFilter};

/// Request body for `POST /restaurants`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    /// Restaurant name.
    pub name: String,
    /// Cuisine text.
    pub cuisine: String,
    /// Location text.
    pub location: String,
    /// Guest rating in `[0, 5]`. Defaults to 4.0.
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Typical delivery time in minutes. Defaults to 30.
    #[serde(default = "default_delivery_time")]
    pub delivery_time: i64,
    /// Free-form menu text.
    #[serde(default)]
    pub menu: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

fn default_rating() -> f64 {
    4.0
}

fn default_delivery_time() -> i64 {
    30
}

impl From<CreateRestaurantRequest> for NewRestaurant {
    fn from(req: CreateRestaurantRequest) -> Self {
        Self {
            name: req.name,
            cuisine: req.cuisine,
            location: req.location,
            rating: req.rating,
            delivery_time: req.delivery_time,
            menu: req.menu,
            description: req.description,
        }
    }
}

/// Query parameters for `GET /restaurants`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RestaurantQuery {
    /// Substring match on cuisine.
    pub cuisine: Option<String>,
    /// Substring match on location.
    pub location: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Maximum delivery time in minutes, inclusive.
    pub max_delivery_time: Option<i64>,
}

impl From<RestaurantQuery> for RestaurantFilter {
    fn from(query: RestaurantQuery) -> Self {
        Self {
            cuisine: query.cuisine,
            location: query.location,
            min_rating: query.min_rating,
            max_delivery_time: query.max_delivery_time,
        }
    }
}

/// A restaurant as returned by all restaurant endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    /// Restaurant identity.
    pub id: i64,
    /// Restaurant name.
    pub name: String,
    /// Cuisine text.
    pub cuisine: String,
    /// Location text.
    pub location: String,
    /// Guest rating.
    pub rating: f64,
    /// Typical delivery time in minutes.
    pub delivery_time: i64,
    /// Free-form menu text.
    pub menu: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            cuisine: restaurant.cuisine,
            location: restaurant.location,
            rating: restaurant.rating,
            delivery_time: restaurant.delivery_time,
            menu: restaurant.menu,
            description: restaurant.description,
            created_at: restaurant.created_at,
        }
    }
}

/// A single line item in an order request or receipt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    /// Item name as shown on the menu.
    #[serde(default)]
    pub name: String,
    /// Unit price; missing prices count as zero.
    #[serde(default)]
    pub price: f64,
    /// Quantity ordered; missing quantities count as one.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl From<OrderItemDto> for OrderItem {
    fn from(dto: OrderItemDto) -> Self {
        Self {
            name: dto.name,
            price: dto.price,
            quantity: dto.quantity,
        }
    }
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Request body for `POST /restaurants/{id}/order`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// Ordered items; must not be empty.
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
    /// Free-form instructions for the kitchen or courier.
    #[serde(default)]
    pub special_instructions: String,
}

/// Order receipt embedded in [`OrderResponse`].
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderReceiptDto {
    /// Client-facing order reference.
    pub reference: Uuid,
    /// Restaurant the order was placed with.
    pub restaurant_id: i64,
    /// Restaurant display name.
    pub restaurant_name: String,
    /// Ordered items, echoed back.
    pub items: Vec<OrderItemDto>,
    /// Free-form instructions, echoed back.
    pub special_instructions: String,
    /// Sum of `price * quantity` over all items.
    pub estimated_total: f64,
    /// Estimated delivery timestamp.
    pub estimated_delivery: DateTime<Utc>,
    /// Order status; always `"confirmed"`.
    pub status: String,
}

impl From<OrderReceipt> for OrderReceiptDto {
    fn from(receipt: OrderReceipt) -> Self {
        Self {
            reference: receipt.reference,
            restaurant_id: receipt.restaurant_id,
            restaurant_name: receipt.restaurant_name,
            items: receipt.items.into_iter().map(OrderItemDto::from).collect(),
            special_instructions: receipt.special_instructions,
            estimated_total: receipt.estimated_total,
            estimated_delivery: receipt.estimated_delivery,
            status: receipt.status,
        }
    }
}

/// Response body for `POST /restaurants/{id}/order`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Order receipt.
    pub order: OrderReceiptDto,
}
