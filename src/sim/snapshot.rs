//! Read-only view of a finished tick
//!
//! Renderers get an owned copy so they can never reach back into the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{DemandTag, ShapeKind, TruckPhase, World};
use crate::consts::{PICKUP_ANCHOR, TRUCK_BED_SLOTS};
use crate::LEFT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeView {
    pub pos: Vec2,
    pub kind: ShapeKind,
}

/// One drawn cell of the truck bed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BedSlot {
    pub pos: Vec2,
    pub sprite: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub loader_pos: Vec2,
    pub bucket_offset: Vec2,
    pub carried_shape: Option<ShapeKind>,
    pub shapes: Vec<ShapeView>,
    pub truck_pos: Vec2,
    pub truck_phase: TruckPhase,
    pub shapes_needed: Vec<DemandTag>,
    pub shapes_loaded: Vec<ShapeKind>,
}

impl Snapshot {
    /// Where the bucket (and anything in it) is drawn
    pub fn bucket_pos(&self) -> Vec2 {
        self.loader_pos + self.bucket_offset + PICKUP_ANCHOR
    }

    /// Bed layout: delivered shapes first, then the outstanding order.
    ///
    /// Entry `i` is drawn at `truck_pos + LEFT * (3 - i)`, so the head of the
    /// order always lines up with the active delivery slot.
    pub fn truck_bed(&self) -> Vec<BedSlot> {
        let loaded = self.shapes_loaded.iter().map(ShapeKind::sprite_key);
        let needed = self.shapes_needed.iter().map(DemandTag::sprite_key);
        loaded
            .chain(needed)
            .enumerate()
            .map(|(i, sprite)| BedSlot {
                pos: self.truck_pos + LEFT * (TRUCK_BED_SLOTS as f32 - 1.0 - i as f32),
                sprite,
            })
            .collect()
    }
}

impl World {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            loader_pos: self.loader.pos,
            bucket_offset: self.loader.bucket_offset,
            carried_shape: self.loader.carried_shape,
            shapes: self
                .shapes
                .iter()
                .map(|s| ShapeView {
                    pos: s.pos,
                    kind: s.kind,
                })
                .collect(),
            truck_pos: self.truck.pos,
            truck_phase: self.truck.phase,
            shapes_needed: self.truck.shapes_needed.iter().copied().collect(),
            shapes_loaded: self.truck.shapes_loaded.clone(),
        }
    }
}
