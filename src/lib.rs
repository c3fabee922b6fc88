//! Shape Loader - A warehouse floor loading game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (loader, bucket, truck, world)
//! - `platform`: Frame clock and directional input
//! - `session`: Driver-owned game session with restart policy
//! - `settings`: Runtime configuration

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionOutcome};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (grid units, seconds)
pub mod consts {
    use glam::Vec2;

    /// Play field dimensions in grid cells
    pub const FLOOR_WIDTH: u32 = 15;
    pub const FLOOR_HEIGHT: u32 = 15;

    /// Loader clamp margin from the far edges (x: width - 1, y: height - 2)
    pub const LOADER_EDGE_MARGIN: Vec2 = Vec2::new(1.0, 2.0);

    /// Spawn positions
    pub const LOADER_START: Vec2 = Vec2::new(10.0, 10.0);
    pub const TRUCK_START: Vec2 = Vec2::new(6.0, 13.0);

    /// Offset between a target point and where the bucket has to sit to scoop it
    pub const PICKUP_ANCHOR: Vec2 = Vec2::new(-0.32, 0.32);
    /// Where the loader stands relative to a pickup/drop point
    pub const APPROACH_OFFSET: Vec2 = Vec2::new(0.6, 0.0);
    /// Manhattan distance for pickup/delivery candidates
    pub const PROXIMITY_THRESHOLD: f32 = 0.6;

    /// Bucket travel speed (grid units per second)
    pub const BUCKET_SPEED: f32 = 5.0;
    /// Default loader speed applied to directional input
    pub const LOADER_SPEED: f32 = 2.0;

    /// Truck velocity once the order is complete
    pub const DEPART_VELOCITY: Vec2 = Vec2::new(-1.0, 0.0);
    /// Where the loader parks relative to a departing truck
    pub const PARKING_OFFSET: Vec2 = Vec2::new(-1.5, -0.7);
    /// First delivery slot sits this far right of the truck origin (before queue scaling)
    pub const SLOT_ANCHOR: Vec2 = Vec2::new(1.0, 0.0);
    /// Truck bed holds this many entries when drawn
    pub const TRUCK_BED_SLOTS: usize = 4;

    /// Session restarts once the truck is this far off the left edge
    pub const RESTART_X: f32 = -2.0;

    /// Layout generation
    pub const SHAPES_PER_KIND: usize = 4;
    pub const DEMAND_COUNT: usize = 4;
    pub const GRID_XS: [u32; 7] = [1, 3, 5, 7, 9, 11, 13];
    pub const GRID_YS: [u32; 6] = [1, 3, 5, 7, 9, 11];

    /// Fixed tick for the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}

pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
pub const UP: Vec2 = Vec2::new(0.0, -1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);

/// Sum of absolute axis differences
#[inline]
pub fn manhattan_distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
