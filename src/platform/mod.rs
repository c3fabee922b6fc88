//! Platform abstraction layer
//!
//! The collaborators the simulation consumes but never owns:
//! - Time (frame deltas from a wall clock)
//! - Input (held direction keys to loader velocity)

pub mod input;
pub mod time;

pub use input::{Direction, HeldDirections};
pub use time::FrameTime;
