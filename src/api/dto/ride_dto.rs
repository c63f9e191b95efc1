//! Ride-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Ride, RideDetail};

/// Request body for `POST /rides`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRideRequest {
    /// Pickup location text.
    pub pickup: String,
    /// Destination text.
    pub destination: String,
}

/// Request body for `POST /rides/{id}/accept`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AcceptRideRequest {
    /// Driver claiming the ride.
    pub driver_id: i64,
}

/// A ride as returned by create, complete, and list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct RideResponse {
    /// Ride identity.
    pub id: i64,
    /// Pickup location text.
    pub pickup: String,
    /// Destination text.
    pub destination: String,
    /// Lifecycle status: `pending`, `accepted`, or `completed`.
    pub status: String,
    /// Assigned driver, if any.
    pub driver_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            pickup: ride.pickup,
            destination: ride.destination,
            status: ride.status.as_str().to_string(),
            driver_id: ride.driver_id,
            created_at: ride.created_at,
        }
    }
}

/// A ride joined with its driver's name, returned by accept and detail reads.
#[derive(Debug, Serialize, ToSchema)]
pub struct RideDetailResponse {
    /// Ride identity.
    pub id: i64,
    /// Pickup location text.
    pub pickup: String,
    /// Destination text.
    pub destination: String,
    /// Lifecycle status: `pending`, `accepted`, or `completed`.
    pub status: String,
    /// Assigned driver, if any.
    pub driver_id: Option<i64>,
    /// Display name of the assigned driver, if any.
    pub driver_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<RideDetail> for RideDetailResponse {
    fn from(detail: RideDetail) -> Self {
        Self {
            id: detail.id,
            pickup: detail.pickup,
            destination: detail.destination,
            status: detail.status.as_str().to_string(),
            driver_id: detail.driver_id,
            driver_name: detail.driver_name,
            created_at: detail.created_at,
        }
    }
}
