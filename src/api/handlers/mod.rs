//! REST endpoint handlers organized by resource.

pub mod drivers;
pub mod hotels;
pub mod restaurants;
pub mod rides;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(rides::routes())
        .merge(drivers::routes())
        .merge(hotels::routes())
        .merge(restaurants::routes())
}
