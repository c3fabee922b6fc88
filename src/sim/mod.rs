//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no clocks
//! - Injected RNG only, used at world creation
//! - Stable iteration order (floor shapes keep creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod layout;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use snapshot::{BedSlot, ShapeView, Snapshot};
pub use state::{
    Bounds, DemandTag, Loader, Shape, ShapeId, ShapeKind, SimEvent, Truck, TruckPhase, World,
};
pub use tick::{TickInput, tick};
