//! Hotel inventory handlers: create, list, get, book, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    BookHotelRequest, BookingDto, BookingResponse, CreateHotelRequest, HotelQuery, HotelResponse,
    MessageResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /hotels` — Add a hotel to the catalog.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] on invalid fields.
#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    tag = "Hotels",
    summary = "Create a hotel",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(req): Json<CreateHotelRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let hotel = state.inventory_service.create_hotel(req.into()).await?;
    Ok((StatusCode::CREATED, Json(HotelResponse::from(hotel))))
}

/// `GET /hotels` — List bookable hotels with optional filters.
///
/// Sold-out hotels are excluded; `location`, `min_price`, and `max_price`
/// predicates are AND-composed.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "Hotels",
    summary = "List hotels",
    params(HotelQuery),
    responses(
        (status = 200, description = "Hotels with rooms remaining", body = Vec<HotelResponse>),
    )
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let hotels = state.inventory_service.list_hotels(&query.into()).await?;
    let body: Vec<HotelResponse> = hotels.into_iter().map(HotelResponse::from).collect();
    Ok(Json(body))
}

/// `GET /hotels/:id` — Get a hotel.
///
/// # Errors
///
/// Returns [`GatewayError::HotelNotFound`] if the hotel does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    summary = "Get a hotel",
    params(
        ("id" = i64, Path, description = "Hotel ID"),
    ),
    responses(
        (status = 200, description = "Hotel details", body = HotelResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
    )
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let hotel = state.inventory_service.hotel(id).await?;
    Ok(Json(HotelResponse::from(hotel)))
}

/// `POST /hotels/:id/book` — Book one room.
///
/// Reserves exactly one room per call; `nights` only scales the price.
///
/// # Errors
///
/// Returns [`GatewayError::HotelNotFound`] for an absent hotel or
/// [`GatewayError::NoRoomsAvailable`] when sold out.
#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/book",
    tag = "Hotels",
    summary = "Book a room",
    description = "Atomically decrements the room counter. Of concurrent bookings racing over the last room, exactly one succeeds; the rest receive 409.",
    params(
        ("id" = i64, Path, description = "Hotel ID"),
    ),
    request_body = BookHotelRequest,
    responses(
        (status = 200, description = "Room booked", body = BookingResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "No rooms available", body = ErrorResponse),
    )
)]
pub async fn book_hotel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BookHotelRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (hotel, receipt) = state.inventory_service.book_hotel(id, req.nights).await?;
    Ok(Json(BookingResponse {
        message: "Hotel booked successfully".to_string(),
        hotel: HotelResponse::from(hotel),
        booking: BookingDto::from(receipt),
    }))
}

/// `DELETE /hotels/:id` — Remove a hotel from the catalog.
///
/// # Errors
///
/// Returns [`GatewayError::HotelNotFound`] if the hotel does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    summary = "Delete a hotel",
    params(
        ("id" = i64, Path, description = "Hotel ID"),
    ),
    responses(
        (status = 200, description = "Hotel deleted", body = MessageResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
    )
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    state.inventory_service.delete_hotel(id).await?;
    Ok(Json(MessageResponse::new("Hotel deleted successfully")))
}

/// Hotel routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", post(create_hotel).get(list_hotels))
        .route("/hotels/{id}", get(get_hotel).delete(delete_hotel))
        .route("/hotels/{id}/book", post(book_hotel))
}
