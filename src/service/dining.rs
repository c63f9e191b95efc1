//! Restaurant catalog and order estimation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{EventBus, MarketEvent, OrderItem, OrderReceipt, Restaurant};
use crate::error::GatewayError;
use crate::store::{NewRestaurant, RestaurantFilter, RestaurantStore};

/// Orchestration layer for restaurants.
///
/// Orders are estimation-only: the receipt is computed from the submitted
/// items and the restaurant's delivery time, and nothing is persisted.
#[derive(Debug, Clone)]
pub struct DiningService {
    restaurants: Arc<dyn RestaurantStore>,
    event_bus: EventBus,
}

impl DiningService {
    /// Creates a new `DiningService`.
    #[must_use]
    pub fn new(restaurants: Arc<dyn RestaurantStore>, event_bus: EventBus) -> Self {
        Self {
            restaurants,
            event_bus,
        }
    }

    /// Adds a restaurant to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the name, cuisine, or
    /// location is empty, the rating falls outside `[0, 5]`, or the
    /// delivery time is not positive; [`GatewayError::Storage`] on store
    /// failure.
    pub async fn create_restaurant(
        &self,
        fields: NewRestaurant,
    ) -> Result<Restaurant, GatewayError> {
        if fields.name.trim().is_empty()
            || fields.cuisine.trim().is_empty()
            || fields.location.trim().is_empty()
        {
            return Err(GatewayError::Validation(
                "name, cuisine, and location are required".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&fields.rating) {
            return Err(GatewayError::Validation(
                "rating must be between 0 and 5".to_string(),
            ));
        }
        if fields.delivery_time <= 0 {
            return Err(GatewayError::Validation(
                "delivery time must be greater than 0".to_string(),
            ));
        }

        let restaurant = self.restaurants.insert(&fields).await?;

        let _ = self.event_bus.publish(MarketEvent::RestaurantListed {
            restaurant_id: restaurant.id,
            name: restaurant.name.clone(),
            cuisine: restaurant.cuisine.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(restaurant_id = restaurant.id, "restaurant listed");
        Ok(restaurant)
    }

    /// Places an order and returns the estimated receipt.
    ///
    /// The estimate sums `price * quantity` over the items; the delivery
    /// estimate is now plus the restaurant's typical delivery time.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if `items` is empty,
    /// [`GatewayError::RestaurantNotFound`] if the restaurant does not
    /// exist, or [`GatewayError::Storage`] on store failure.
    pub async fn place_order(
        &self,
        restaurant_id: i64,
        items: Vec<OrderItem>,
        special_instructions: String,
    ) -> Result<OrderReceipt, GatewayError> {
        if items.is_empty() {
            return Err(GatewayError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }

        let restaurant = self
            .restaurants
            .get(restaurant_id)
            .await?
            .ok_or(GatewayError::RestaurantNotFound(restaurant_id))?;

        let estimated_total: f64 = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();
        let estimated_delivery = Utc::now() + Duration::minutes(restaurant.delivery_time);

        let receipt = OrderReceipt {
            reference: Uuid::new_v4(),
            restaurant_id,
            restaurant_name: restaurant.name,
            items,
            special_instructions,
            estimated_total,
            estimated_delivery,
            status: "confirmed".to_string(),
        };

        let _ = self.event_bus.publish(MarketEvent::OrderPlaced {
            restaurant_id,
            reference: receipt.reference,
            estimated_total,
            timestamp: Utc::now(),
        });

        tracing::info!(restaurant_id, estimated_total, "order placed");
        Ok(receipt)
    }

    /// Fetches a restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RestaurantNotFound`] if the restaurant does
    /// not exist, or [`GatewayError::Storage`] on store failure.
    pub async fn restaurant(&self, restaurant_id: i64) -> Result<Restaurant, GatewayError> {
        self.restaurants
            .get(restaurant_id)
            .await?
            .ok_or(GatewayError::RestaurantNotFound(restaurant_id))
    }

    /// Lists restaurants, best-rated first, applying the filter.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    pub async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<Restaurant>, GatewayError> {
        self.restaurants.list(filter).await
    }

    /// Removes a restaurant from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RestaurantNotFound`] if the restaurant does
    /// not exist, or [`GatewayError::Storage`] on store failure.
    pub async fn delete_restaurant(&self, restaurant_id: i64) -> Result<(), GatewayError> {
        let affected = self.restaurants.delete(restaurant_id).await?;
        if affected == 0 {
            return Err(GatewayError::RestaurantNotFound(restaurant_id));
        }

        let _ = self.event_bus.publish(MarketEvent::RestaurantDelisted {
            restaurant_id,
            timestamp: Utc::now(),
        });

        tracing::info!(restaurant_id, "restaurant delisted");
        Ok(())
    }
}
