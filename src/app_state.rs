//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{DiningService, InventoryService, RideService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ride lifecycle and driver registry.
    pub ride_service: Arc<RideService>,
    /// Hotel inventory and booking.
    pub inventory_service: Arc<InventoryService>,
    /// Restaurant catalog and ordering.
    pub dining_service: Arc<DiningService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
