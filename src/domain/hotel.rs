//! Hotel inventory records and booking receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hotel row from the `hotels` table.
///
/// `available_rooms` is the scarce resource: bookings decrement it by one
/// through a conditional update and it never goes below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Store-assigned identity.
    pub id: i64,
    /// Hotel name.
    pub name: String,
    /// City or area text used for filtered listings.
    pub location: String,
    /// Nightly rate; strictly positive.
    pub price_per_night: f64,
    /// Guest rating in `[0, 5]`.
    pub rating: f64,
    /// Comma-separated amenity list.
    pub amenities: String,
    /// Free-form description.
    pub description: String,
    /// Rooms left to sell; never negative.
    pub available_rooms: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Receipt for a successful room booking.
///
/// Bookings are not persisted; the receipt's `reference` is generated for
/// client-side correlation only.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    /// Client-facing booking reference.
    pub reference: Uuid,
    /// Booked hotel.
    pub hotel_id: i64,
    /// Number of nights charged for.
    pub nights: i64,
    /// `price_per_night * nights`.
    pub total_cost: f64,
    /// Booking timestamp.
    pub booked_at: DateTime<Utc>,
}
