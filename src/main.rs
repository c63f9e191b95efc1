//! meridian-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints backed by
//! a PostgreSQL store.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use meridian_gateway::api;
use meridian_gateway::app_state::AppState;
use meridian_gateway::config::GatewayConfig;
use meridian_gateway::domain::EventBus;
use meridian_gateway::service::{DiningService, InventoryService, RideService};
use meridian_gateway::store::postgres::PostgresStore;
use meridian_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting meridian-gateway");

    // Open the store and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    let store = Arc::new(PostgresStore::new(pool.clone()));
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let ride_service = Arc::new(RideService::new(
        store.clone(),
        store.clone(),
        event_bus.clone(),
    ));
    let inventory_service = Arc::new(InventoryService::new(
        store.clone(),
        event_bus.clone(),
    ));
    let dining_service = Arc::new(DiningService::new(store.clone(), event_bus.clone()));

    // Build application state
    let app_state = AppState {
        ride_service,
        inventory_service,
        dining_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Close the store before exiting
    pool.close().await;

    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
    }
}
