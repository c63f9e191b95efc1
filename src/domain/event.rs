//! Domain events reflecting marketplace state mutations.
//!
//! Every successful mutation emits a [`MarketEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers, which
//! filter them by [`Topic`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Coarse event category used for WebSocket subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Ride lifecycle events.
    Rides,
    /// Driver registry events.
    Drivers,
    /// Hotel inventory events.
    Hotels,
    /// Restaurant and ordering events.
    Restaurants,
}

impl Topic {
    /// Parses a topic name as used in WebSocket subscribe commands.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rides" => Some(Self::Rides),
            "drivers" => Some(Self::Drivers),
            "hotels" => Some(Self::Hotels),
            "restaurants" => Some(Self::Restaurants),
            _ => None,
        }
    }
}

/// Domain event emitted after every successful state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// A new ride was created and is waiting for a driver.
    RideRequested {
        /// Ride identity.
        ride_id: i64,
        /// Pickup location.
        pickup: String,
        /// Destination.
        destination: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A driver claimed a pending ride.
    RideAccepted {
        /// Ride identity.
        ride_id: i64,
        /// Claiming driver.
        driver_id: i64,
        /// Acceptance timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An accepted ride was completed.
    RideCompleted {
        /// Ride identity.
        ride_id: i64,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A new driver joined the registry.
    DriverRegistered {
        /// Driver identity.
        driver_id: i64,
        /// Display name.
        name: String,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A driver's availability text was updated.
    DriverStatusChanged {
        /// Driver identity.
        driver_id: i64,
        /// New status text.
        status: String,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A hotel was added to the catalog.
    HotelListed {
        /// Hotel identity.
        hotel_id: i64,
        /// Hotel name.
        name: String,
        /// Location text.
        location: String,
        /// Listing timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A room was booked and the inventory counter decremented.
    HotelBooked {
        /// Hotel identity.
        hotel_id: i64,
        /// Booking reference from the receipt.
        reference: Uuid,
        /// Nights charged for.
        nights: i64,
        /// Total cost of the booking.
        total_cost: f64,
        /// Rooms left after the decrement.
        rooms_remaining: i64,
        /// Booking timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A hotel was removed from the catalog.
    HotelDelisted {
        /// Hotel identity.
        hotel_id: i64,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A restaurant was added to the catalog.
    RestaurantListed {
        /// Restaurant identity.
        restaurant_id: i64,
        /// Restaurant name.
        name: String,
        /// Cuisine text.
        cuisine: String,
        /// Listing timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A restaurant was removed from the catalog.
    RestaurantDelisted {
        /// Restaurant identity.
        restaurant_id: i64,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An order was placed with a restaurant.
    OrderPlaced {
        /// Restaurant identity.
        restaurant_id: i64,
        /// Order reference from the receipt.
        reference: Uuid,
        /// Estimated order total.
        estimated_total: f64,
        /// Order timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    /// Returns the subscription topic this event belongs to.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::RideRequested { .. } | Self::RideAccepted { .. } | Self::RideCompleted { .. } => {
                Topic::Rides
            }
            Self::DriverRegistered { .. } | Self::DriverStatusChanged { .. } => Topic::Drivers,
            Self::HotelListed { .. } | Self::HotelBooked { .. } | Self::HotelDelisted { .. } => {
                Topic::Hotels
            }
            Self::RestaurantListed { .. }
            | Self::RestaurantDelisted { .. }
            | Self::OrderPlaced { .. } => Topic::Restaurants,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::RideRequested { .. } => "ride_requested",
            Self::RideAccepted { .. } => "ride_accepted",
            Self::RideCompleted { .. } => "ride_completed",
            Self::DriverRegistered { .. } => "driver_registered",
            Self::DriverStatusChanged { .. } => "driver_status_changed",
            Self::HotelListed { .. } => "hotel_listed",
            Self::HotelBooked { .. } => "hotel_booked",
            Self::HotelDelisted { .. } => "hotel_delisted",
            Self::RestaurantListed { .. } => "restaurant_listed",
            Self::RestaurantDelisted { .. } => "restaurant_delisted",
            Self::OrderPlaced { .. } => "order_placed",
        }
    }
}
