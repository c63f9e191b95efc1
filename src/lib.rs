//! # meridian-gateway
//!
//! REST API and WebSocket gateway for the Meridian rides, stays, and
//! dining marketplace.
//!
//! Every state transition that hands a scarce resource to a caller — a
//! driver claiming a ride, a booking taking a hotel room — is a single
//! conditional write against the relational store, checked by affected-row
//! count. There is no application-level locking; the store is the only
//! shared mutable state.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RideService / InventoryService / DiningService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Store traits (store/)
//!     │     ├── PostgresStore (sqlx)
//!     │     └── MemoryStore (tests, demos)
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
pub mod ws;
