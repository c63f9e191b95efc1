//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; `/health` sits at
//! the root. With the `swagger-ui` feature enabled (default), interactive
//! docs are served at `/docs`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the annotated endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Meridian Gateway",
        description = "Rides, stays, and dining marketplace API"
    ),
    paths(
        handlers::system::health_handler,
        handlers::rides::create_ride,
        handlers::rides::list_rides,
        handlers::rides::get_ride,
        handlers::rides::accept_ride,
        handlers::rides::complete_ride,
        handlers::drivers::register_driver,
        handlers::drivers::list_drivers,
        handlers::drivers::get_driver,
        handlers::drivers::set_driver_status,
        handlers::hotels::create_hotel,
        handlers::hotels::list_hotels,
        handlers::hotels::get_hotel,
        handlers::hotels::book_hotel,
        handlers::hotels::delete_hotel,
    ),
    tags(
        (name = "Rides", description = "Ride lifecycle"),
        (name = "Drivers", description = "Driver registry"),
        (name = "Hotels", description = "Hotel inventory and booking"),
        (name = "System", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
