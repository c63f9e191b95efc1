//! Ride lifecycle handlers: create, list, get, accept, complete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AcceptRideRequest, CreateRideRequest, RideDetailResponse, RideResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /rides` — Create a ride request.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] if pickup or destination is empty.
#[utoipa::path(
    post,
    path = "/api/v1/rides",
    tag = "Rides",
    summary = "Create a ride request",
    description = "Creates a pending ride with no driver assigned.",
    request_body = CreateRideRequest,
    responses(
        (status = 201, description = "Ride created", body = RideResponse),
        (status = 400, description = "Missing pickup or destination", body = ErrorResponse),
    )
)]
pub async fn create_ride(
    State(state): State<AppState>,
    Json(req): Json<CreateRideRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let ride = state
        .ride_service
        .create_ride(&req.pickup, &req.destination)
        .await?;
    Ok((StatusCode::CREATED, Json(RideResponse::from(ride))))
}

/// `GET /rides` — List all rides, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/rides",
    tag = "Rides",
    summary = "List rides",
    responses(
        (status = 200, description = "All rides, newest first", body = Vec<RideResponse>),
    )
)]
pub async fn list_rides(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let rides = state.ride_service.list_rides().await?;
    let body: Vec<RideResponse> = rides.into_iter().map(RideResponse::from).collect();
    Ok(Json(body))
}

/// `GET /rides/:id` — Get a ride joined with its driver's name.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] if the ride does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/rides/{id}",
    tag = "Rides",
    summary = "Get ride details",
    params(
        ("id" = i64, Path, description = "Ride ID"),
    ),
    responses(
        (status = 200, description = "Ride details", body = RideDetailResponse),
        (status = 404, description = "Ride not found", body = ErrorResponse),
    )
)]
pub async fn get_ride(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let detail = state.ride_service.ride(id).await?;
    Ok(Json(RideDetailResponse::from(detail)))
}

/// `POST /rides/:id/accept` — Assign a driver to a pending ride.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for an absent ride,
/// [`GatewayError::RideNotPending`] if it was already taken, or
/// [`GatewayError::DriverNotFound`] for an unknown driver.
#[utoipa::path(
    post,
    path = "/api/v1/rides/{id}/accept",
    tag = "Rides",
    summary = "Accept a ride",
    description = "Atomically claims a pending ride for a driver. Of concurrent attempts on the same ride, exactly one succeeds; the rest receive 409.",
    params(
        ("id" = i64, Path, description = "Ride ID"),
    ),
    request_body = AcceptRideRequest,
    responses(
        (status = 200, description = "Ride accepted", body = RideDetailResponse),
        (status = 404, description = "Ride or driver not found", body = ErrorResponse),
        (status = 409, description = "Ride already accepted or completed", body = ErrorResponse),
    )
)]
pub async fn accept_ride(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AcceptRideRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let detail = state.ride_service.accept_ride(id, req.driver_id).await?;
    Ok(Json(RideDetailResponse::from(detail)))
}

/// `POST /rides/:id/complete` — Complete an accepted ride.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for an absent ride or
/// [`GatewayError::RideNotPending`] if it is not currently accepted.
#[utoipa::path(
    post,
    path = "/api/v1/rides/{id}/complete",
    tag = "Rides",
    summary = "Complete a ride",
    params(
        ("id" = i64, Path, description = "Ride ID"),
    ),
    responses(
        (status = 200, description = "Ride completed", body = RideResponse),
        (status = 404, description = "Ride not found", body = ErrorResponse),
        (status = 409, description = "Ride is not in the accepted state", body = ErrorResponse),
    )
)]
pub async fn complete_ride(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let ride = state.ride_service.complete_ride(id).await?;
    Ok(Json(RideResponse::from(ride)))
}

/// Ride routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rides", post(create_ride).get(list_rides))
        .route("/rides/{id}", get(get_ride))
        .route("/rides/{id}/accept", post(accept_ride))
        .route("/rides/{id}/complete", post(complete_ride))
}
