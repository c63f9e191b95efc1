//! WebSocket layer: live event feed for marketplace mutations.
//!
//! Clients connect at `/ws`, subscribe to topics (`rides`, `drivers`,
//! `hotels`, `restaurants`, or the `"*"` wildcard), and receive every
//! matching [`crate::domain::MarketEvent`] as it is published.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
