//! Store layer: repository traits over the relational store.
//!
//! Every state-changing transition is expressed as exactly one conditional
//! write whose affected-row count is returned to the caller. The services
//! turn a zero count into the appropriate not-found or conflict error; the
//! store itself never interprets it. Two implementations exist:
//! [`postgres::PostgresStore`] for production and [`memory::MemoryStore`]
//! for the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Driver, Hotel, Restaurant, Ride, RideDetail};
use crate::error::GatewayError;

/// Field set for inserting a new hotel row.
#[derive(Debug, Clone)]
pub struct NewHotel {
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
    /// Initial room count.
    pub available_rooms: i64,
}

/// Field set for inserting a new restaurant row.
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    /// Restaurant name.
    pub name: String,
    /// Cuisine text.
    pub cuisine: String,
    /// Location text.
    pub location: String,
    /// Guest rating.
    pub rating: f64,
    /// Delivery time in minutes.
    pub delivery_time: i64,
    /// Free-form menu text.
    pub menu: String,
    /// Free-form description.
    pub description: String,
}

/// AND-composed predicates for hotel listings.
///
/// Rows with `available_rooms = 0` are always excluded.
#[derive(Debug, Clone, Default)]
pub struct HotelFilter {
    /// Substring match on location (case-insensitive).
    pub location: Option<String>,
    /// Minimum nightly rate, inclusive.
    pub min_price: Option<f64>,
    /// Maximum nightly rate, inclusive.
    pub max_price: Option<f64>,
}

/// AND-composed predicates for restaurant listings.
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    /// Substring match on cuisine (case-insensitive).
    pub cuisine: Option<String>,
    /// Substring match on location (case-insensitive).
    pub location: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Maximum delivery time in minutes, inclusive.
    pub max_delivery_time: Option<i64>,
}

/// Persistence operations for the `rides` table.
#[async_trait]
pub trait RideStore: Send + Sync + std::fmt::Debug {
    /// Inserts a pending ride and returns the full created row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn insert(&self, pickup: &str, destination: &str) -> Result<Ride, GatewayError>;

    /// Fetches a ride by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn get(&self, id: i64) -> Result<Option<Ride>, GatewayError>;

    /// Fetches a ride joined with its driver's name.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn get_detail(&self, id: i64) -> Result<Option<RideDetail>, GatewayError>;

    /// Lists all rides, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn list(&self) -> Result<Vec<Ride>, GatewayError>;

    /// Conditionally assigns a driver: the update matches on
    /// `status = 'pending'` as well as the id, so at most one of any number
    /// of concurrent claims can observe an affected row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn claim(&self, id: i64, driver_id: i64) -> Result<u64, GatewayError>;

    /// Conditionally completes a ride: the update matches on
    /// `status = 'accepted'` as well as the id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn finish(&self, id: i64) -> Result<u64, GatewayError>;
}

/// Persistence operations for the `drivers` table.
#[async_trait]
pub trait DriverStore: Send + Sync + std::fmt::Debug {
    /// Inserts a driver and returns the full created row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn insert(&self, name: &str, status: &str) -> Result<Driver, GatewayError>;

    /// Fetches a driver by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn get(&self, id: i64) -> Result<Option<Driver>, GatewayError>;

    /// Lists all drivers, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn list(&self) -> Result<Vec<Driver>, GatewayError>;

    /// Overwrites a driver's status text, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn set_status(&self, id: i64, status: &str) -> Result<u64, GatewayError>;
}

/// Persistence operations for the `hotels` table.
#[async_trait]
pub trait HotelStore: Send + Sync + std::fmt::Debug {
    /// Inserts a hotel and returns the full created row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, GatewayError>;

    /// Fetches a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn get(&self, id: i64) -> Result<Option<Hotel>, GatewayError>;

    /// Lists hotels with rooms left, newest first, applying the filter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, GatewayError>;

    /// Conditionally decrements `available_rooms` by one: the update
    /// matches on `available_rooms > 0` as well as the id, so the counter
    /// can never be driven negative by concurrent bookings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn reserve_room(&self, id: i64) -> Result<u64, GatewayError>;

    /// Deletes a hotel, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn delete(&self, id: i64) -> Result<u64, GatewayError>;
}

/// Persistence operations for the `restaurants` table.
#[async_trait]
pub trait RestaurantStore: Send + Sync + std::fmt::Debug {
    /// Inserts a restaurant and returns the full created row.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, GatewayError>;

    /// Fetches a restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn get(&self, id: i64) -> Result<Option<Restaurant>, GatewayError>;

    /// Lists restaurants, best-rated first, applying the filter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, GatewayError>;

    /// Deletes a restaurant, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    async fn delete(&self, id: i64) -> Result<u64, GatewayError>;
}
