//! End-to-end tests driving the router against the in-memory store.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use meridian_gateway::api;
use meridian_gateway::app_state::AppState;
use meridian_gateway::domain::EventBus;
use meridian_gateway::service::{DiningService, InventoryService, RideService};
use meridian_gateway::store::memory::MemoryStore;
use meridian_gateway::ws::handler::ws_handler;

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let event_bus = EventBus::new(100);

    let state = AppState {
        ride_service: Arc::new(RideService::new(
            store.clone(),
            store.clone(),
            event_bus.clone(),
        )),
        inventory_service: Arc::new(InventoryService::new(
            store.clone(),
            event_bus.clone(),
        )),
        dining_service: Arc::new(DiningService::new(store.clone(), event_bus.clone())),
        event_bus,
    };

    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let Ok(request) = builder.body(body) else {
        panic!("failed to build request for {uri}");
    };
    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("request to {uri} failed");
    };
    let status = response.status().as_u16();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("failed to read body from {uri}");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn ride_round_trips_through_create_and_get() {
    let app = test_app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/rides",
        Some(json!({"pickup": "Downtown", "destination": "Airport"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["status"], "pending");
    assert!(created["driver_id"].is_null());

    let id = created["id"].as_i64().unwrap_or_default();
    let (status, fetched) = send(&app, "GET", &format!("/api/v1/rides/{id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["pickup"], created["pickup"]);
    assert_eq!(fetched["destination"], created["destination"]);
    assert_eq!(fetched["status"], created["status"]);
    assert_eq!(fetched["created_at"], created["created_at"]);
}

#[tokio::test]
async fn ride_creation_requires_pickup_and_destination() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/rides",
        Some(json!({"pickup": "", "destination": "X"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn accept_and_complete_walk_the_state_machine() {
    let app = test_app();
    let (_, driver) = send(
        &app,
        "POST",
        "/api/v1/drivers",
        Some(json!({"name": "Dana"})),
    )
    .await;
    let driver_id = driver["id"].as_i64().unwrap_or_default();

    let (_, ride) = send(
        &app,
        "POST",
        "/api/v1/rides",
        Some(json!({"pickup": "A", "destination": "B"})),
    )
    .await;
    let ride_id = ride["id"].as_i64().unwrap_or_default();

    let (status, accepted) = send(
        &app,
        "POST",
        &format!("/api/v1/rides/{ride_id}/accept"),
        Some(json!({"driver_id": driver_id})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(accepted["status"], "accepted");
    assert_eq!(accepted["driver_name"], "Dana");

    // A second accept must conflict, not 404
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/rides/{ride_id}/accept"),
        Some(json!({"driver_id": driver_id})),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], 2101);

    let (status, completed) = send(
        &app,
        "POST",
        &format!("/api/v1/rides/{ride_id}/complete"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(completed["status"], "completed");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/rides/{ride_id}/complete"),
        None,
    )
    .await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn accepting_a_missing_ride_is_not_found() {
    let app = test_app();
    let (_, driver) = send(
        &app,
        "POST",
        "/api/v1/drivers",
        Some(json!({"name": "Dana"})),
    )
    .await;
    let driver_id = driver["id"].as_i64().unwrap_or_default();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/rides/999/accept",
        Some(json!({"driver_id": driver_id})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn driver_defaults_to_available_and_status_is_updatable() {
    let app = test_app();
    let (status, driver) = send(
        &app,
        "POST",
        "/api/v1/drivers",
        Some(json!({"name": "Riley"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(driver["status"], "available");

    let driver_id = driver["id"].as_i64().unwrap_or_default();
    let (status, updated) = send(
        &app,
        "POST",
        &format!("/api/v1/drivers/{driver_id}/status"),
        Some(json!({"status": "off_duty"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["status"], "off_duty");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/drivers/999/status",
        Some(json!({"status": "gone"})),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn booking_charges_nights_and_reserves_one_room() {
    let app = test_app();
    let (status, hotel) = send(
        &app,
        "POST",
        "/api/v1/hotels",
        Some(json!({
            "name": "Harbor View",
            "location": "Marina Bay",
            "price_per_night": 100.0,
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(hotel["available_rooms"], 10);
    assert_eq!(hotel["rating"], 4.0);

    let hotel_id = hotel["id"].as_i64().unwrap_or_default();
    let (status, booked) = send(
        &app,
        "POST",
        &format!("/api/v1/hotels/{hotel_id}/book"),
        Some(json!({"nights": 3})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(booked["booking"]["total_cost"], 300.0);
    assert_eq!(booked["booking"]["nights"], 3);
    assert_eq!(booked["hotel"]["available_rooms"], 9);
}

#[tokio::test]
async fn last_room_cannot_be_oversold() {
    let app = test_app();
    let (_, hotel) = send(
        &app,
        "POST",
        "/api/v1/hotels",
        Some(json!({
            "name": "Tiny Inn",
            "location": "Old Town",
            "price_per_night": 50.0,
            "available_rooms": 1,
        })),
    )
    .await;
    let hotel_id = hotel["id"].as_i64().unwrap_or_default();

    let (status, first) = send(
        &app,
        "POST",
        &format!("/api/v1/hotels/{hotel_id}/book"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(first["hotel"]["available_rooms"], 0);

    let (status, second) = send(
        &app,
        "POST",
        &format!("/api/v1/hotels/{hotel_id}/book"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(second["error"]["code"], 2102);

    // Sold-out hotels disappear from listings
    let (_, listed) = send(&app, "GET", "/api/v1/hotels", None).await;
    let rows = listed.as_array().cloned().unwrap_or_default();
    assert!(rows.iter().all(|h| h["id"].as_i64() != Some(hotel_id)));
}

#[tokio::test]
async fn booking_a_missing_hotel_is_not_found() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/hotels/42/book",
        Some(json!({"nights": 2})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], 2003);
}

#[tokio::test]
async fn hotel_listing_applies_filters() {
    let app = test_app();
    let _ = send(
        &app,
        "POST",
        "/api/v1/hotels",
        Some(json!({"name": "Cheap Stay", "location": "Suburbs", "price_per_night": 40.0})),
    )
    .await;
    let _ = send(
        &app,
        "POST",
        "/api/v1/hotels",
        Some(json!({"name": "Grand Marina", "location": "Marina Bay", "price_per_night": 220.0})),
    )
    .await;

    let (status, listed) = send(
        &app,
        "GET",
        "/api/v1/hotels?location=marina&min_price=100",
        None,
    )
    .await;
    assert_eq!(status, 200);
    let rows = listed.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Grand Marina");
}

#[tokio::test]
async fn deleting_a_hotel_twice_is_not_found() {
    let app = test_app();
    let (_, hotel) = send(
        &app,
        "POST",
        "/api/v1/hotels",
        Some(json!({"name": "Short Lived", "location": "Center", "price_per_night": 75.0})),
    )
    .await;
    let hotel_id = hotel["id"].as_i64().unwrap_or_default();

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/hotels/{hotel_id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Hotel deleted successfully");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/hotels/{hotel_id}"), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn restaurant_order_estimates_total_and_delivery() {
    let app = test_app();
    let (status, restaurant) = send(
        &app,
        "POST",
        "/api/v1/restaurants",
        Some(json!({
            "name": "Noodle Barn",
            "cuisine": "Thai",
            "location": "Old Town",
            "delivery_time": 25,
        })),
    )
    .await;
    assert_eq!(status, 201);
    let restaurant_id = restaurant["id"].as_i64().unwrap_or_default();

    let (status, ordered) = send(
        &app,
        "POST",
        &format!("/api/v1/restaurants/{restaurant_id}/order"),
        Some(json!({
            "items": [
                {"name": "pad thai", "price": 12.5, "quantity": 2},
                {"name": "green curry", "price": 10.0},
            ],
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(ordered["order"]["estimated_total"], 35.0);
    assert_eq!(ordered["order"]["status"], "confirmed");
    assert!(ordered["order"]["estimated_delivery"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/restaurants/{restaurant_id}/order"),
        Some(json!({"items": []})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], 1001);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/restaurants/999/order",
        Some(json!({"items": [{"price": 1.0}]})),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn restaurant_listing_filters_by_cuisine() {
    let app = test_app();
    let _ = send(
        &app,
        "POST",
        "/api/v1/restaurants",
        Some(json!({"name": "Noodle Barn", "cuisine": "Thai", "location": "Old Town"})),
    )
    .await;
    let _ = send(
        &app,
        "POST",
        "/api/v1/restaurants",
        Some(json!({"name": "Trattoria", "cuisine": "Italian", "location": "Center", "rating": 4.8})),
    )
    .await;

    let (status, listed) = send(&app, "GET", "/api/v1/restaurants?cuisine=thai", None).await;
    assert_eq!(status, 200);
    let rows = listed.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Noodle Barn");

    // Unfiltered listing is sorted best-rated first
    let (_, all) = send(&app, "GET", "/api/v1/restaurants", None).await;
    let rows = all.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Trattoria");
}
