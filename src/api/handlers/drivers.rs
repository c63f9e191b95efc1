//! Driver registry handlers: register, list, get, update status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{DriverResponse, RegisterDriverRequest, UpdateDriverStatusRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /drivers` — Register a driver.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] if the name is empty.
#[utoipa::path(
    post,
    path = "/api/v1/drivers",
    tag = "Drivers",
    summary = "Register a driver",
    request_body = RegisterDriverRequest,
    responses(
        (status = 201, description = "Driver registered", body = DriverResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
    )
)]
pub async fn register_driver(
    State(state): State<AppState>,
    Json(req): Json<RegisterDriverRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let driver = state
        .ride_service
        .register_driver(&req.name, req.status.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(DriverResponse::from(driver))))
}

/// `GET /drivers` — List all drivers, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/drivers",
    tag = "Drivers",
    summary = "List drivers",
    responses(
        (status = 200, description = "All drivers, newest first", body = Vec<DriverResponse>),
    )
)]
pub async fn list_drivers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let drivers = state.ride_service.list_drivers().await?;
    let body: Vec<DriverResponse> = drivers.into_iter().map(DriverResponse::from).collect();
    Ok(Json(body))
}

/// `GET /drivers/:id` — Get a driver.
///
/// # Errors
///
/// Returns [`GatewayError::DriverNotFound`] if the driver does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/drivers/{id}",
    tag = "Drivers",
    summary = "Get a driver",
    params(
        ("id" = i64, Path, description = "Driver ID"),
    ),
    responses(
        (status = 200, description = "Driver details", body = DriverResponse),
        (status = 404, description = "Driver not found", body = ErrorResponse),
    )
)]
pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let driver = state.ride_service.driver(id).await?;
    Ok(Json(DriverResponse::from(driver)))
}

/// `POST /drivers/:id/status` — Overwrite a driver's status text.
///
/// Ride transitions never touch driver status; this endpoint is the only
/// way to change it.
///
/// # Errors
///
/// Returns [`GatewayError::DriverNotFound`] if the driver does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/drivers/{id}/status",
    tag = "Drivers",
    summary = "Update driver status",
    params(
        ("id" = i64, Path, description = "Driver ID"),
    ),
    request_body = UpdateDriverStatusRequest,
    responses(
        (status = 200, description = "Driver updated", body = DriverResponse),
        (status = 404, description = "Driver not found", body = ErrorResponse),
    )
)]
pub async fn set_driver_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDriverStatusRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let driver = state.ride_service.set_driver_status(id, &req.status).await?;
    Ok(Json(DriverResponse::from(driver)))
}

/// Driver routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", post(register_driver).get(list_drivers))
        .route("/drivers/{id}", get(get_driver))
        .route("/drivers/{id}/status", post(set_driver_status))
}
