//! In-memory implementation of the store traits.
//!
//! Used by the test suite and local demos. A single async mutex guards all
//! tables, so conditional updates observe and mutate state atomically with
//! the same semantics as the SQL implementation: the check and the write
//! happen under one critical section and the affected-row count is reported.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{
    DriverStore, HotelFilter, HotelStore, NewHotel, NewRestaurant, RestaurantFilter,
    RestaurantStore, RideStore,
};
use crate::domain::{Driver, Hotel, Restaurant, Ride, RideDetail, RideStatus};
use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Tables {
    rides: BTreeMap<i64, Ride>,
    drivers: BTreeMap<i64, Driver>,
    hotels: BTreeMap<i64, Hotel>,
    restaurants: BTreeMap<i64, Restaurant>,
    next_ride_id: i64,
    next_driver_id: i64,
    next_hotel_id: i64,
    next_restaurant_id: i64,
}

/// In-memory store over [`BTreeMap`] tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl RideStore for MemoryStore {
    async fn insert(&self, pickup: &str, destination: &str) -> Result<Ride, GatewayError> {
        let mut tables = self.tables.lock().await;
        tables.next_ride_id += 1;
        let ride = Ride {
            id: tables.next_ride_id,
            pickup: pickup.to_string(),
            destination: destination.to_string(),
            status: RideStatus::Pending,
            driver_id: None,
            created_at: Utc::now(),
        };
        tables.rides.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn get(&self, id: i64) -> Result<Option<Ride>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.rides.get(&id).cloned())
    }

    async fn get_detail(&self, id: i64) -> Result<Option<RideDetail>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.rides.get(&id).map(|ride| {
            let driver_name = ride
                .driver_id
                .and_then(|driver_id| tables.drivers.get(&driver_id))
                .map(|driver| driver.name.clone());
            RideDetail {
                id: ride.id,
                pickup: ride.pickup.clone(),
                destination: ride.destination.clone(),
                status: ride.status,
                driver_id: ride.driver_id,
                driver_name,
                created_at: ride.created_at,
            }
        }))
    }

    async fn list(&self) -> Result<Vec<Ride>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.rides.values().rev().cloned().collect())
    }

    async fn claim(&self, id: i64, driver_id: i64) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        match tables.rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Pending => {
                ride.status = RideStatus::Accepted;
                ride.driver_id = Some(driver_id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn finish(&self, id: i64) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        match tables.rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Accepted => {
                ride.status = RideStatus::Completed;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[async_trait]
impl DriverStore for MemoryStore {
    async fn insert(&self, name: &str, status: &str) -> Result<Driver, GatewayError> {
        let mut tables = self.tables.lock().await;
        tables.next_driver_id += 1;
        let driver = Driver {
            id: tables.next_driver_id,
            name: name.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        };
        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn get(&self, id: i64) -> Result<Option<Driver>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.drivers.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Driver>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.drivers.values().rev().cloned().collect())
    }

    async fn set_status(&self, id: i64, status: &str) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        match tables.drivers.get_mut(&id) {
            Some(driver) => {
                driver.status = status.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, GatewayError> {
        let mut tables = self.tables.lock().await;
        tables.next_hotel_id += 1;
        let hotel = Hotel {
            id: tables.next_hotel_id,
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            price_per_night: hotel.price_per_night,
            rating: hotel.rating,
            amenities: hotel.amenities.clone(),
            description: hotel.description.clone(),
            available_rooms: hotel.available_rooms,
            created_at: Utc::now(),
        };
        tables.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn get(&self, id: i64) -> Result<Option<Hotel>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.hotels.get(&id).cloned())
    }

    async fn list(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .hotels
            .values()
            .rev()
            .filter(|hotel| hotel.available_rooms > 0)
            .filter(|hotel| {
                filter
                    .location
                    .as_deref()
                    .is_none_or(|location| contains_ci(&hotel.location, location))
            })
            .filter(|hotel| {
                filter
                    .min_price
                    .is_none_or(|min| hotel.price_per_night >= min)
            })
            .filter(|hotel| {
                filter
                    .max_price
                    .is_none_or(|max| hotel.price_per_night <= max)
            })
            .cloned()
            .collect())
    }

    async fn reserve_room(&self, id: i64) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        match tables.hotels.get_mut(&id) {
            Some(hotel) if hotel.available_rooms > 0 => {
                hotel.available_rooms -= 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        Ok(u64::from(tables.hotels.remove(&id).is_some()))
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn insert(&self, restaurant: &NewRestaurant) -> Result<Restaurant, GatewayError> {
        let mut tables = self.tables.lock().await;
        tables.next_restaurant_id += 1;
        let restaurant = Restaurant {
            id: tables.next_restaurant_id,
            name: restaurant.name.clone(),
            cuisine: restaurant.cuisine.clone(),
            location: restaurant.location.clone(),
            rating: restaurant.rating,
            delivery_time: restaurant.delivery_time,
            menu: restaurant.menu.clone(),
            description: restaurant.description.clone(),
            created_at: Utc::now(),
        };
        tables.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    async fn get(&self, id: i64) -> Result<Option<Restaurant>, GatewayError> {
        let tables = self.tables.lock().await;
        Ok(tables.restaurants.get(&id).cloned())
    }

    async fn list(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, GatewayError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Restaurant> = tables
            .restaurants
            .values()
            .filter(|restaurant| {
                filter
                    .cuisine
                    .as_deref()
                    .is_none_or(|cuisine| contains_ci(&restaurant.cuisine, cuisine))
            })
            .filter(|restaurant| {
                filter
                    .location
                    .as_deref()
                    .is_none_or(|location| contains_ci(&restaurant.location, location))
            })
            .filter(|restaurant| filter.min_rating.is_none_or(|min| restaurant.rating >= min))
            .filter(|restaurant| {
                filter
                    .max_delivery_time
                    .is_none_or(|max| restaurant.delivery_time <= max)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, GatewayError> {
        let mut tables = self.tables.lock().await;
        Ok(u64::from(tables.restaurants.remove(&id).is_some()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn claim_succeeds_exactly_once() {
        let store = MemoryStore::new();
        let ride = RideStore::insert(&store, "A", "B").await;
        let Ok(ride) = ride else {
            panic!("insert failed");
        };

        let first = store.claim(ride.id, 1).await;
        let second = store.claim(ride.id, 2).await;
        assert_eq!(first.ok(), Some(1));
        assert_eq!(second.ok(), Some(0));

        let stored = RideStore::get(&store, ride.id).await.ok().flatten();
        let Some(stored) = stored else {
            panic!("ride vanished");
        };
        assert_eq!(stored.status, RideStatus::Accepted);
        assert_eq!(stored.driver_id, Some(1));
    }

    #[tokio::test]
    async fn concurrent_claims_admit_one_winner() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let ride = RideStore::insert(&*store, "A", "B").await;
        let Ok(ride) = ride else {
            panic!("insert failed");
        };

        let s1 = std::sync::Arc::clone(&store);
        let s2 = std::sync::Arc::clone(&store);
        let id = ride.id;
        let (a, b) = tokio::join!(
            tokio::spawn(async move { s1.claim(id, 1).await }),
            tokio::spawn(async move { s2.claim(id, 2).await }),
        );
        let a = a.ok().and_then(Result::ok).unwrap_or(0);
        let b = b.ok().and_then(Result::ok).unwrap_or(0);
        assert_eq!(a + b, 1, "exactly one claim must win");
    }

    #[tokio::test]
    async fn reserve_room_never_drives_counter_negative() {
        let store = MemoryStore::new();
        let hotel = HotelStore::insert(
            &store,
            &NewHotel {
                name: "Harbor View".to_string(),
                location: "Marina".to_string(),
                price_per_night: 120.0,
                rating: 4.5,
                amenities: String::new(),
                description: String::new(),
                available_rooms: 1,
            },
        )
        .await;
        let Ok(hotel) = hotel else {
            panic!("insert failed");
        };

        assert_eq!(store.reserve_room(hotel.id).await.ok(), Some(1));
        assert_eq!(store.reserve_room(hotel.id).await.ok(), Some(0));

        let stored = HotelStore::get(&store, hotel.id).await.ok().flatten();
        let Some(stored) = stored else {
            panic!("hotel vanished");
        };
        assert_eq!(stored.available_rooms, 0);
    }

    #[tokio::test]
    async fn finish_requires_accepted() {
        let store = MemoryStore::new();
        let ride = RideStore::insert(&store, "A", "B").await;
        let Ok(ride) = ride else {
            panic!("insert failed");
        };

        assert_eq!(store.finish(ride.id).await.ok(), Some(0));
        assert_eq!(store.claim(ride.id, 1).await.ok(), Some(1));
        assert_eq!(store.finish(ride.id).await.ok(), Some(1));
        assert_eq!(store.finish(ride.id).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn hotel_list_excludes_sold_out_rows() {
        let store = MemoryStore::new();
        let sold_out = NewHotel {
            name: "Full House".to_string(),
            location: "Center".to_string(),
            price_per_night: 90.0,
            rating: 4.0,
            amenities: String::new(),
            description: String::new(),
            available_rooms: 0,
        };
        let open = NewHotel {
            name: "Open Doors".to_string(),
            available_rooms: 3,
            ..sold_out.clone()
        };
        let _ = HotelStore::insert(&store, &sold_out).await;
        let _ = HotelStore::insert(&store, &open).await;

        let listed = HotelStore::list(&store, &HotelFilter::default())
            .await
            .unwrap_or_default();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|h| h.name == "Open Doors"));
    }
}
