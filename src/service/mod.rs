//! Service layer: stateless orchestrators over the store.
//!
//! Each service validates primitive input, performs exactly one conditional
//! write per state transition, translates affected-row counts into the
//! error taxonomy, and publishes a domain event on success. No state is
//! cached between calls; every operation re-reads the store.

pub mod dining;
pub mod inventory;
pub mod rides;

pub use dining::DiningService;
pub use inventory::InventoryService;
pub use rides::RideService;
