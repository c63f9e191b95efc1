//! Restaurant handlers: create, list, get, order, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateRestaurantRequest, MessageResponse, OrderReceiptDto, OrderResponse, PlaceOrderRequest,
    RestaurantQuery, RestaurantResponse,
};
use crate::app_state::AppState;
use crate::domain::OrderItem;
use crate::error::GatewayError;

/// `POST /restaurants` — Add a restaurant to the catalog.
async fn create_restaurant(
    State(state): State<AppState>,
    Json(req): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let restaurant = state.dining_service.create_restaurant(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RestaurantResponse::from(restaurant)),
    ))
}

/// `GET /restaurants` — List restaurants with optional filters, best first.
async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let restaurants = state.dining_service.list_restaurants(&query.into()).await?;
    let body: Vec<RestaurantResponse> = restaurants
        .into_iter()
        .map(RestaurantResponse::from)
        .collect();
    Ok(Json(body))
}

/// `GET /restaurants/:id` — Get a restaurant.
async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let restaurant = state.dining_service.restaurant(id).await?;
    Ok(Json(RestaurantResponse::from(restaurant)))
}

/// `POST /restaurants/:id/order` — Place an order and get an estimate.
async fn place_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let items: Vec<OrderItem> = req.items.into_iter().map(OrderItem::from).collect();
    let receipt = state
        .dining_service
        .place_order(id, items, req.special_instructions)
        .await?;
    Ok(Json(OrderResponse {
        message: "Order placed successfully".to_string(),
        order: OrderReceiptDto::from(receipt),
    }))
}

/// `DELETE /restaurants/:id` — Remove a restaurant from the catalog.
async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    state.dining_service.delete_restaurant(id).await?;
    Ok(Json(MessageResponse::new("Restaurant deleted successfully")))
}

/// Restaurant routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", post(create_restaurant).get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
        .route("/restaurants/{id}/order", post(place_order))
}
