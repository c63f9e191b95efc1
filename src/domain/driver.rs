//! Driver records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status a freshly registered driver starts with.
pub const DEFAULT_DRIVER_STATUS: &str = "available";

/// A driver row from the `drivers` table.
///
/// `status` is free-form text; ride transitions never change it. An
/// orchestration layer that wants the driver marked busy after accepting a
/// ride must issue an explicit status update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Store-assigned identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form availability text, `"available"` by default.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
