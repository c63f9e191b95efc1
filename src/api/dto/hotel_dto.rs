//! Hotel-related DTOs for catalog and booking operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{BookingReceipt, Hotel};
use crate::store::{HotelFilter, NewHotel};

/// Request body for `POST /hotels`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHotelRequest {
    /// Hotel name.
    pub name: String,
    /// Location text.
    pub location: String,
    /// Nightly rate; must be positive.
    pub price_per_night: f64,
    /// Guest rating in `[0, 5]`. Defaults to 4.0.
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Comma-separated amenity list.
    #[serde(default)]
    pub amenities: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Initial room count. Defaults to 10.
    #[serde(default = "default_rooms")]
    pub available_rooms: i64,
}

fn default_rating() -> f64 {
    4.0
}

fn default_rooms() -> i64 {
    10
}

impl From<CreateHotelRequest> for NewHotel {
    fn from(req: CreateHotelRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
            price_per_night: req.price_per_night,
            rating: req.rating,
            amenities: req.amenities,
            description: req.description,
            available_rooms: req.available_rooms,
        }
    }
}

/// Query parameters for `GET /hotels`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct HotelQuery {
    /// Substring match on location.
    pub location: Option<String>,
    /// Minimum nightly rate, inclusive.
    pub min_price: Option<f64>,
    /// Maximum nightly rate, inclusive.
    pub max_price: Option<f64>,
}

impl From<HotelQuery> for HotelFilter {
    fn from(query: HotelQuery) -> Self {
        Self {
            location: query.location,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// Request body for `POST /hotels/{id}/book`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookHotelRequest {
    /// Number of nights; defaults to 1, must be at least 1.
    #[serde(default = "default_nights")]
    pub nights: i64,
}

fn default_nights() -> i64 {
    1
}

/// A hotel as returned by all hotel endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelResponse {
    /// Hotel identity.
    pub id: i64,
    /// Hotel name.
    pub name: String,
    /// Location text.
    pub location: String,
    /// Nightly rate.
    pub price_per_night: f64,
    /// Guest rating.
    pub rating: f64,
    /// Comma-separated amenity list.
    pub amenities: String,
    /// Free-form description.
    pub description: String,
    /// Rooms left to sell.
    pub available_rooms: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            location: hotel.location,
            price_per_night: hotel.price_per_night,
            rating: hotel.rating,
            amenities: hotel.amenities,
            description: hotel.description,
            available_rooms: hotel.available_rooms,
            created_at: hotel.created_at,
        }
    }
}

/// Booking receipt embedded in [`BookingResponse`].
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    /// Client-facing booking reference.
    pub reference: Uuid,
    /// Booked hotel.
    pub hotel_id: i64,
    /// Nights charged for.
    pub nights: i64,
    /// `price_per_night * nights`.
    pub total_cost: f64,
    /// Booking timestamp.
    pub booked_at: DateTime<Utc>,
}

impl From<BookingReceipt> for BookingDto {
    fn from(receipt: BookingReceipt) -> Self {
        Self {
            reference: receipt.reference,
            hotel_id: receipt.hotel_id,
            nights: receipt.nights,
            total_cost: receipt.total_cost,
            booked_at: receipt.booked_at,
        }
    }
}

/// Response body for `POST /hotels/{id}/book`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Hotel state after the decrement.
    pub hotel: HotelResponse,
    /// Booking receipt.
    pub booking: BookingDto,
}
