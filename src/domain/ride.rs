//! Ride records and the ride status state machine.
//!
//! A ride moves `pending → accepted → completed`, each transition exactly
//! once. `driver_id` is set at acceptance time and never reassigned, so a
//! ride has a driver if and only if its status is not [`RideStatus::Pending`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    /// Created, waiting for a driver.
    Pending,
    /// Claimed by exactly one driver.
    Accepted,
    /// Finished; terminal.
    Completed,
}

impl RideStatus {
    /// Returns the status as the string stored in the `rides.status` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown ride status: {other}")),
        }
    }
}

/// A ride row from the `rides` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    /// Store-assigned identity.
    pub id: i64,
    /// Pickup location text.
    pub pickup: String,
    /// Destination text.
    pub destination: String,
    /// Lifecycle status.
    pub status: RideStatus,
    /// Assigned driver; `None` until accepted, immutable once set.
    pub driver_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A ride joined with its driver's name, returned by accept/detail reads.
#[derive(Debug, Clone, Serialize)]
pub struct RideDetail {
    /// Store-assigned identity.
    pub id: i64,
    /// Pickup location text.
    pub pickup: String,
    /// Destination text.
    pub destination: String,
    /// Lifecycle status.
    pub status: RideStatus,
    /// Assigned driver, if any.
    pub driver_id: Option<i64>,
    /// Display name of the assigned driver, if any.
    pub driver_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
