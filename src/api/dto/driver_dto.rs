//! Driver-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Driver;

/// Request body for `POST /drivers`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterDriverRequest {
    /// Display name.
    pub name: String,
    /// Initial status text; defaults to `"available"` when omitted.
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for `POST /drivers/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDriverStatusRequest {
    /// New free-form status text.
    pub status: String,
}

/// A driver as returned by all driver endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DriverResponse {
    /// Driver identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form availability text.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            status: driver.status,
            created_at: driver.created_at,
        }
    }
}
