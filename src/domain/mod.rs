//! Domain layer: marketplace records, events, and the event bus.
//!
//! This module contains the server-side domain model: rides with their
//! status state machine, drivers, hotel inventory, restaurants, and the
//! broadcast event system that mirrors every state mutation.

pub mod driver;
pub mod event;
pub mod event_bus;
pub mod hotel;
pub mod restaurant;
pub mod ride;

pub use driver::{DEFAULT_DRIVER_STATUS, Driver};
pub use event::{MarketEvent, Topic};
pub use event_bus::EventBus;
pub use hotel::{BookingReceipt, Hotel};
pub use restaurant::{OrderItem, OrderReceipt, Restaurant};
pub use ride::{Ride, RideDetail, RideStatus};
