//! Hotel inventory orchestration: catalog CRUD and room reservation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BookingReceipt, EventBus, Hotel, MarketEvent};
use crate::error::GatewayError;
use crate::store::{HotelFilter, HotelStore, NewHotel};

/// Orchestration layer for hotel inventory.
///
/// Room reservation is the race-prone operation: the decrement is a single
/// conditional write matching `available_rooms > 0`, so two bookings racing
/// over the last room cannot both succeed and the counter can never go
/// negative.
#[derive(Debug, Clone)]
pub struct InventoryService {
    hotels: Arc<dyn HotelStore>,
    event_bus: EventBus,
}

impl InventoryService {
    /// Creates a new `InventoryService`.
    #[must_use]
    pub fn new(hotels: Arc<dyn HotelStore>, event_bus: EventBus) -> Self {
        Self { hotels, event_bus }
    }

    /// Adds a hotel to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the name or location is
    /// empty, the price is not positive, the rating falls outside `[0, 5]`,
    /// or the room count is negative; [`GatewayError::Storage`] on store
    /// failure.
    pub async fn create_hotel(&self, fields: NewHotel) -> Result<Hotel, GatewayError> {
        if fields.name.trim().is_empty() || fields.location.trim().is_empty() {
            return Err(GatewayError::Validation(
                "name and location are required".to_string(),
            ));
        }
        if fields.price_per_night <= 0.0 {
            return Err(GatewayError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&fields.rating) {
            return Err(GatewayError::Validation(
                "rating must be between 0 and 5".to_string(),
            ));
        }
        if fields.available_rooms < 0 {
            return Err(GatewayError::Validation(
                "available rooms cannot be negative".to_string(),
            ));
        }

        let hotel = self.hotels.insert(&fields).await?;

        let _ = self.event_bus.publish(MarketEvent::HotelListed {
            hotel_id: hotel.id,
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(hotel_id = hotel.id, "hotel listed");
        Ok(hotel)
    }

    /// Books one room for the given number of nights.
    ///
    /// Exactly one room is reserved per call regardless of `nights`; nights
    /// only scale the price. The reservation is one conditional decrement
    /// checked by affected-row count, then the row is re-read for the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if `nights < 1`,
    /// [`GatewayError::HotelNotFound`] if the hotel does not exist,
    /// [`GatewayError::NoRoomsAvailable`] if it is sold out, or
    /// [`GatewayError::Storage`] on store failure.
    pub async fn book_hotel(
        &self,
        hotel_id: i64,
        nights: i64,
    ) -> Result<(Hotel, BookingReceipt), GatewayError> {
        if nights < 1 {
            return Err(GatewayError::Validation(
                "nights must be at least 1".to_string(),
            ));
        }

        let affected = self.hotels.reserve_room(hotel_id).await?;
        if affected == 0 {
            return match self.hotels.get(hotel_id).await? {
                None => Err(GatewayError::HotelNotFound(hotel_id)),
                Some(_) => Err(GatewayError::NoRoomsAvailable(hotel_id)),
            };
        }

        let hotel = self
            .hotels
            .get(hotel_id)
            .await?
            .ok_or(GatewayError::HotelNotFound(hotel_id))?;

        let receipt = BookingReceipt {
            reference: Uuid::new_v4(),
            hotel_id,
            nights,
            total_cost: hotel.price_per_night * nights as f64,
            booked_at: Utc::now(),
        };

        let _ = self.event_bus.publish(MarketEvent::HotelBooked {
            hotel_id,
            reference: receipt.reference,
            nights,
            total_cost: receipt.total_cost,
            rooms_remaining: hotel.available_rooms,
            timestamp: Utc::now(),
        });

        tracing::info!(
            hotel_id,
            nights,
            rooms_remaining = hotel.available_rooms,
            "hotel booked"
        );
        Ok((hotel, receipt))
    }

    /// Fetches a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HotelNotFound`] if the hotel does not exist,
    /// or [`GatewayError::Storage`] on store failure.
    pub async fn hotel(&self, hotel_id: i64) -> Result<Hotel, GatewayError> {
        self.hotels
            .get(hotel_id)
            .await?
            .ok_or(GatewayError::HotelNotFound(hotel_id))
    }

    /// Lists bookable hotels (rooms remaining), applying the filter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    pub async fn list_hotels(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, GatewayError> {
        self.hotels.list(filter).await
    }

    /// Removes a hotel from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HotelNotFound`] if the hotel does not exist,
    /// or [`GatewayError::Storage`] on store failure.
    pub async fn delete_hotel(&self, hotel_id: i64) -> Result<(), GatewayError> {
        let affected = self.hotels.delete(hotel_id).await?;
        if affected == 0 {
            return Err(GatewayError::HotelNotFound(hotel_id));
        }

        let _ = self.event_bus.publish(MarketEvent::HotelDelisted {
            hotel_id,
            timestamp: Utc::now(),
        });

        tracing::info!(hotel_id, "hotel delisted");
        Ok(())
    }
}
