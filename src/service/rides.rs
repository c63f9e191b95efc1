//! Ride lifecycle and driver registry orchestration.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{DEFAULT_DRIVER_STATUS, Driver, EventBus, MarketEvent, Ride, RideDetail};
use crate::error::GatewayError;
use crate::store::{DriverStore, RideStore};

/// Orchestration layer for rides and the driver registry.
///
/// Drives the `pending → accepted → completed` state machine. Both
/// transitions are single conditional writes; a zero affected-row count is
/// resolved into not-found or conflict by re-reading the row. Ride
/// transitions never touch driver status; orchestrators that want it
/// synced call [`RideService::set_driver_status`] themselves.
#[derive(Debug, Clone)]
pub struct RideService {
    rides: Arc<dyn RideStore>,
    drivers: Arc<dyn DriverStore>,
    event_bus: EventBus,
}

impl RideService {
    /// Creates a new `RideService`.
    #[must_use]
    pub fn new(rides: Arc<dyn RideStore>, drivers: Arc<dyn DriverStore>, event_bus: EventBus) -> Self {
        Self {
            rides,
            drivers,
            event_bus,
        }
    }

    /// Creates a pending ride.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if pickup or destination is
    /// empty after trimming, or [`GatewayError::Storage`] on store failure.
    pub async fn create_ride(&self, pickup: &str, destination: &str) -> Result<Ride, GatewayError> {
        let pickup = pickup.trim();
        let destination = destination.trim();
        if pickup.is_empty() || destination.is_empty() {
            return Err(GatewayError::Validation(
                "pickup and destination are required".to_string(),
            ));
        }

        let ride = self.rides.insert(pickup, destination).await?;

        let _ = self.event_bus.publish(MarketEvent::RideRequested {
            ride_id: ride.id,
            pickup: ride.pickup.clone(),
            destination: ride.destination.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(ride_id = ride.id, "ride requested");
        Ok(ride)
    }

    /// Assigns a driver to a pending ride.
    ///
    /// The transition is conditioned atomically on the ride still being
    /// pending, so of any number of concurrent acceptances at most one
    /// observes an affected row; the rest see the conflict error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DriverNotFound`] if the driver does not
    /// exist, [`GatewayError::RideNotFound`] if the ride does not exist,
    /// [`GatewayError::RideNotPending`] if it was already accepted or
    /// completed, or [`GatewayError::Storage`] on store failure.
    pub async fn accept_ride(
        &self,
        ride_id: i64,
        driver_id: i64,
    ) -> Result<RideDetail, GatewayError> {
        if self.drivers.get(driver_id).await?.is_none() {
            return Err(GatewayError::DriverNotFound(driver_id));
        }

        let affected = self.rides.claim(ride_id, driver_id).await?;
        if affected == 0 {
            return match self.rides.get(ride_id).await? {
                None => Err(GatewayError::RideNotFound(ride_id)),
                Some(_) => Err(GatewayError::RideNotPending(ride_id)),
            };
        }

        let detail = self
            .rides
            .get_detail(ride_id)
            .await?
            .ok_or(GatewayError::RideNotFound(ride_id))?;

        let _ = self.event_bus.publish(MarketEvent::RideAccepted {
            ride_id,
            driver_id,
            timestamp: Utc::now(),
        });

        tracing::info!(ride_id, driver_id, "ride accepted");
        Ok(detail)
    }

    /// Completes an accepted ride.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist,
    /// [`GatewayError::RideNotPending`] if it is not currently accepted,
    /// or [`GatewayError::Storage`] on store failure.
    pub async fn complete_ride(&self, ride_id: i64) -> Result<Ride, GatewayError> {
        let affected = self.rides.finish(ride_id).await?;
        if affected == 0 {
            return match self.rides.get(ride_id).await? {
                None => Err(GatewayError::RideNotFound(ride_id)),
                Some(_) => Err(GatewayError::RideNotPending(ride_id)),
            };
        }

        let ride = self
            .rides
            .get(ride_id)
            .await?
            .ok_or(GatewayError::RideNotFound(ride_id))?;

        let _ = self.event_bus.publish(MarketEvent::RideCompleted {
            ride_id,
            timestamp: Utc::now(),
        });

        tracing::info!(ride_id, "ride completed");
        Ok(ride)
    }

    /// Fetches a ride joined with its driver's name.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist,
    /// or [`GatewayError::Storage`] on store failure.
    pub async fn ride(&self, ride_id: i64) -> Result<RideDetail, GatewayError> {
        self.rides
            .get_detail(ride_id)
            .await?
            .ok_or(GatewayError::RideNotFound(ride_id))
    }

    /// Lists all rides, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    pub async fn list_rides(&self) -> Result<Vec<Ride>, GatewayError> {
        self.rides.list().await
    }

    /// Registers a driver, defaulting the status to `"available"`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the name is empty after
    /// trimming, or [`GatewayError::Storage`] on store failure.
    pub async fn register_driver(
        &self,
        name: &str,
        status: Option<&str>,
    ) -> Result<Driver, GatewayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GatewayError::Validation("name is required".to_string()));
        }

        let status = status.unwrap_or(DEFAULT_DRIVER_STATUS);
        let driver = self.drivers.insert(name, status).await?;

        let _ = self.event_bus.publish(MarketEvent::DriverRegistered {
            driver_id: driver.id,
            name: driver.name.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(driver_id = driver.id, "driver registered");
        Ok(driver)
    }

    /// Fetches a driver by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DriverNotFound`] if the driver does not
    /// exist, or [`GatewayError::Storage`] on store failure.
    pub async fn driver(&self, driver_id: i64) -> Result<Driver, GatewayError> {
        self.drivers
            .get(driver_id)
            .await?
            .ok_or(GatewayError::DriverNotFound(driver_id))
    }

    /// Lists all drivers, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on store failure.
    pub async fn list_drivers(&self) -> Result<Vec<Driver>, GatewayError> {
        self.drivers.list().await
    }

    /// Overwrites a driver's free-form status text.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DriverNotFound`] if the driver does not
    /// exist, or [`GatewayError::Storage`] on store failure.
    pub async fn set_driver_status(
        &self,
        driver_id: i64,
        status: &str,
    ) -> Result<Driver, GatewayError> {
        let affected = self.drivers.set_status(driver_id, status).await?;
        if affected == 0 {
            return Err(GatewayError::DriverNotFound(driver_id));
        }

        let driver = self
            .drivers
            .get(driver_id)
            .await?
            .ok_or(GatewayError::DriverNotFound(driver_id))?;

        let _ = self.event_bus.publish(MarketEvent::DriverStatusChanged {
            driver_id,
            status: driver.status.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(driver_id, status = %driver.status, "driver status updated");
        Ok(driver)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RideStatus;
    use crate::store::memory::MemoryStore;

    fn make_service() -> RideService {
        let store = Arc::new(MemoryStore::new());
        RideService::new(store.clone(), store, EventBus::new(100))
    }

    async fn seed_driver(service: &RideService) -> Driver {
        let driver = service.register_driver("Dana", None).await;
        let Ok(driver) = driver else {
            panic!("driver registration failed");
        };
        driver
    }

    #[tokio::test]
    async fn create_ride_starts_pending_without_driver() {
        let service = make_service();
        let ride = service.create_ride("Downtown", "Airport").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };
        assert_eq!(ride.status, RideStatus::Pending);
        assert_eq!(ride.driver_id, None);
    }

    #[tokio::test]
    async fn create_ride_rejects_empty_pickup() {
        let service = make_service();
        let err = service.create_ride("", "X").await;
        assert!(matches!(err, Err(GatewayError::Validation(_))));

        let err = service.create_ride("   ", "X").await;
        assert!(matches!(err, Err(GatewayError::Validation(_))));
    }

    #[tokio::test]
    async fn accept_sets_driver_and_returns_name() {
        let service = make_service();
        let driver = seed_driver(&service).await;
        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };

        let detail = service.accept_ride(ride.id, driver.id).await;
        let Ok(detail) = detail else {
            panic!("accept failed");
        };
        assert_eq!(detail.status, RideStatus::Accepted);
        assert_eq!(detail.driver_id, Some(driver.id));
        assert_eq!(detail.driver_name.as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn accept_distinguishes_absent_from_taken() {
        let service = make_service();
        let driver = seed_driver(&service).await;

        let missing = service.accept_ride(999, driver.id).await;
        assert!(matches!(missing, Err(GatewayError::RideNotFound(999))));

        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };
        let first = service.accept_ride(ride.id, driver.id).await;
        assert!(first.is_ok());

        let second = service.accept_ride(ride.id, driver.id).await;
        assert!(matches!(second, Err(GatewayError::RideNotPending(_))));
    }

    #[tokio::test]
    async fn accept_requires_existing_driver() {
        let service = make_service();
        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };

        let err = service.accept_ride(ride.id, 42).await;
        assert!(matches!(err, Err(GatewayError::DriverNotFound(42))));
    }

    #[tokio::test]
    async fn concurrent_accepts_admit_exactly_one() {
        let service = Arc::new(make_service());
        let d1 = seed_driver(&service).await;
        let d2 = seed_driver(&service).await;
        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };

        let (s1, s2) = (Arc::clone(&service), Arc::clone(&service));
        let id = ride.id;
        let (a, b) = tokio::join!(
            tokio::spawn(async move { s1.accept_ride(id, d1.id).await }),
            tokio::spawn(async move { s2.accept_ride(id, d2.id).await }),
        );
        let outcomes = [a, b].map(|h| h.ok().map(|r| r.is_ok()).unwrap_or(false));
        let winners = outcomes.iter().filter(|ok| **ok).count();
        assert_eq!(winners, 1, "exactly one concurrent accept must win");
    }

    #[tokio::test]
    async fn complete_requires_accepted_status() {
        let service = make_service();
        let driver = seed_driver(&service).await;

        let missing = service.complete_ride(404).await;
        assert!(matches!(missing, Err(GatewayError::RideNotFound(404))));

        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };
        let pending = service.complete_ride(ride.id).await;
        assert!(matches!(pending, Err(GatewayError::RideNotPending(_))));

        let accepted = service.accept_ride(ride.id, driver.id).await;
        assert!(accepted.is_ok());
        let completed = service.complete_ride(ride.id).await;
        let Ok(completed) = completed else {
            panic!("complete failed");
        };
        assert_eq!(completed.status, RideStatus::Completed);
        assert_eq!(completed.driver_id, Some(driver.id));

        let again = service.complete_ride(ride.id).await;
        assert!(matches!(again, Err(GatewayError::RideNotPending(_))));
    }

    #[tokio::test]
    async fn driver_id_set_iff_not_pending() {
        let service = make_service();
        let driver = seed_driver(&service).await;
        for i in 0..3 {
            let ride = service.create_ride("A", "B").await;
            let Ok(ride) = ride else {
                panic!("create failed");
            };
            if i > 0 {
                let _ = service.accept_ride(ride.id, driver.id).await;
            }
            if i > 1 {
                let _ = service.complete_ride(ride.id).await;
            }
        }
        let rides = service.list_rides().await.unwrap_or_default();
        assert_eq!(rides.len(), 3);
        for ride in rides {
            assert_eq!(
                ride.driver_id.is_some(),
                ride.status != RideStatus::Pending,
                "driver must be set iff ride left pending"
            );
        }
    }

    #[tokio::test]
    async fn accept_does_not_touch_driver_status() {
        let service = make_service();
        let driver = seed_driver(&service).await;
        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };
        let _ = service.accept_ride(ride.id, driver.id).await;

        let after = service.driver(driver.id).await;
        let Ok(after) = after else {
            panic!("driver lookup failed");
        };
        assert_eq!(after.status, DEFAULT_DRIVER_STATUS);
    }

    #[tokio::test]
    async fn set_driver_status_round_trips() {
        let service = make_service();
        let driver = seed_driver(&service).await;

        let updated = service.set_driver_status(driver.id, "on_trip").await;
        let Ok(updated) = updated else {
            panic!("status update failed");
        };
        assert_eq!(updated.status, "on_trip");

        let missing = service.set_driver_status(999, "gone").await;
        assert!(matches!(missing, Err(GatewayError::DriverNotFound(999))));
    }

    #[tokio::test]
    async fn accept_publishes_event() {
        let service = make_service();
        let mut rx = service.event_bus.subscribe();
        let driver = seed_driver(&service).await;
        let ride = service.create_ride("A", "B").await;
        let Ok(ride) = ride else {
            panic!("create failed");
        };
        // Drain DriverRegistered and RideRequested
        let _ = rx.recv().await;
        let _ = rx.recv().await;

        let _ = service.accept_ride(ride.id, driver.id).await;
        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "ride_accepted");
    }
}
