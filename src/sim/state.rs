//! World state and core simulation types
//!
//! Everything the tick mutates lives here. Rendering and input only ever see
//! a finished tick through [`World::snapshot`](super::snapshot).

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layout;
use crate::consts::*;

/// Floor item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Circle,
    Square,
    Diamond,
}

impl ShapeKind {
    /// All kinds, in layout order
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Triangle,
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Diamond,
    ];

    pub fn sprite_key(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Diamond => "diamond",
        }
    }
}

/// A truck order entry: "bring one shape of this kind next"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandTag {
    TriangleNeeded,
    CircleNeeded,
    SquareNeeded,
    DiamondNeeded,
}

impl DemandTag {
    pub fn for_shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Triangle => DemandTag::TriangleNeeded,
            ShapeKind::Circle => DemandTag::CircleNeeded,
            ShapeKind::Square => DemandTag::SquareNeeded,
            ShapeKind::Diamond => DemandTag::DiamondNeeded,
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            DemandTag::TriangleNeeded => ShapeKind::Triangle,
            DemandTag::CircleNeeded => ShapeKind::Circle,
            DemandTag::SquareNeeded => ShapeKind::Square,
            DemandTag::DiamondNeeded => ShapeKind::Diamond,
        }
    }

    /// Overlay sprite drawn on the truck bed for an unfilled slot
    pub fn sprite_key(&self) -> &'static str {
        match self {
            DemandTag::TriangleNeeded => "triangle_needed",
            DemandTag::CircleNeeded => "circle_needed",
            DemandTag::SquareNeeded => "square_needed",
            DemandTag::DiamondNeeded => "diamond_needed",
        }
    }
}

/// Stable handle for a floor shape
pub type ShapeId = u32;

/// A shape lying on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub pos: Vec2,
    pub kind: ShapeKind,
}

/// Floor size in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: FLOOR_WIDTH,
            height: FLOOR_HEIGHT,
        }
    }
}

impl Bounds {
    /// Largest position the loader may occupy
    pub fn loader_max(&self) -> Vec2 {
        (Vec2::new(self.width as f32, self.height as f32) - LOADER_EDGE_MARGIN).max(Vec2::ZERO)
    }

    /// Clamp a loader position onto the floor
    pub fn clamp_loader(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.loader_max())
    }
}

/// Truck lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TruckPhase {
    /// Parked, waiting for its order
    #[default]
    Idle,
    /// Order complete, driving off (terminal)
    Departing,
}

/// The truck being loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub phase: TruckPhase,
    /// Remaining order, head is delivered next
    pub shapes_needed: VecDeque<DemandTag>,
    /// Delivered shapes in delivery order
    pub shapes_loaded: Vec<ShapeKind>,
}

impl Truck {
    pub fn new(pos: Vec2, shapes_needed: impl IntoIterator<Item = DemandTag>) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            phase: TruckPhase::Idle,
            shapes_needed: shapes_needed.into_iter().collect(),
            shapes_loaded: Vec::new(),
        }
    }

    /// Kind the loader has to bring next
    pub fn next_needed(&self) -> Option<ShapeKind> {
        self.shapes_needed.front().map(DemandTag::shape_kind)
    }

    /// Drop point for the head of the order.
    ///
    /// Later queue entries sit further left on the bed, so the active slot
    /// moves one cell right per delivery.
    pub fn delivery_slot(&self) -> Vec2 {
        self.pos + crate::LEFT * self.shapes_needed.len() as f32 + SLOT_ANCHOR
    }

    /// Switch to departing. Returns true on the first call only.
    pub fn depart(&mut self) -> bool {
        self.vel = DEPART_VELOCITY;
        if self.phase == TruckPhase::Departing {
            return false;
        }
        self.phase = TruckPhase::Departing;
        true
    }
}

/// The player-driven loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loader {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current bucket position relative to the body
    pub bucket_offset: Vec2,
    /// Where the bucket settles when nothing is tracked
    pub bucket_rest: Vec2,
    /// Floor shape the bucket is reaching for
    pub nearby_shape: Option<ShapeId>,
    /// Truck drop point the bucket is reaching for
    pub nearby_needed_slot: Option<Vec2>,
    /// Shape held in the bucket
    pub carried_shape: Option<ShapeKind>,
}

impl Loader {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            bucket_offset: Vec2::ZERO,
            bucket_rest: Vec2::ZERO,
            nearby_shape: None,
            nearby_needed_slot: None,
            carried_shape: None,
        }
    }
}

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    PickedUp { shape: ShapeId, kind: ShapeKind },
    Delivered { kind: ShapeKind, remaining: usize },
    Departed,
}

/// One game session's worth of state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub loader: Loader,
    pub truck: Truck,
    /// Floor shapes in creation order (scan order for pickup detection)
    pub shapes: Vec<Shape>,
    pub bounds: Bounds,
    next_shape_id: ShapeId,
}

impl World {
    /// Build a fresh session: shuffled floor layout and a random order
    pub fn create<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let floor = layout::floor_layout(rng, SHAPES_PER_KIND);
        let mut world = Self {
            loader: Loader::new(LOADER_START),
            truck: Truck::new(TRUCK_START, layout::draw_demand(rng, DEMAND_COUNT)),
            shapes: Vec::new(),
            bounds,
            next_shape_id: 1,
        };

        for (pos, kind) in floor {
            world.spawn_shape(pos, kind);
        }

        log::info!(
            "New world: {} shapes on the floor, order {:?}",
            world.shapes.len(),
            world.truck.shapes_needed
        );
        world
    }

    /// Place a shape on the floor and return its handle
    pub fn spawn_shape(&mut self, pos: Vec2, kind: ShapeKind) -> ShapeId {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        self.shapes.push(Shape { id, pos, kind });
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Take a shape off the floor
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// True once the truck has driven past the restart line
    pub fn truck_gone(&self) -> bool {
        self.truck.pos.x < RESTART_X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_demand_tag_mapping() {
        for kind in ShapeKind::ALL {
            assert_eq!(DemandTag::for_shape(kind).shape_kind(), kind);
        }
        assert_eq!(DemandTag::CircleNeeded.sprite_key(), "circle_needed");
        assert_eq!(ShapeKind::Diamond.sprite_key(), "diamond");
    }

    #[test]
    fn test_create_world() {
        let mut rng = Pcg32::seed_from_u64(42);
        let world = World::create(Bounds::default(), &mut rng);

        assert_eq!(world.shapes.len(), 16);
        for kind in ShapeKind::ALL {
            assert_eq!(world.shapes.iter().filter(|s| s.kind == kind).count(), 4);
        }
        assert_eq!(world.truck.shapes_needed.len(), 4);
        assert!(world.truck.shapes_loaded.is_empty());
        assert_eq!(world.truck.phase, TruckPhase::Idle);
        assert_eq!(world.truck.vel, Vec2::ZERO);
        assert_eq!(world.loader.pos, LOADER_START);
        assert_eq!(world.loader.carried_shape, None);

        // Distinct positions on the odd grid
        for (i, a) in world.shapes.iter().enumerate() {
            assert_eq!(a.pos.x as u32 % 2, 1);
            assert_eq!(a.pos.y as u32 % 2, 1);
            assert!(a.pos.y <= 11.0);
            for b in &world.shapes[i + 1..] {
                assert_ne!(a.pos, b.pos);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_create_is_deterministic() {
        let a = World::create(Bounds::default(), &mut Pcg32::seed_from_u64(7));
        let b = World::create(Bounds::default(), &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.shapes, b.shapes);
        assert_eq!(a.truck.shapes_needed, b.truck.shapes_needed);
    }

    #[test]
    fn test_spawn_and_remove_shape() {
        let mut world = World::create(Bounds::default(), &mut Pcg32::seed_from_u64(1));
        let id = world.spawn_shape(Vec2::new(2.0, 2.0), ShapeKind::Square);
        assert_eq!(world.shape(id).map(|s| s.kind), Some(ShapeKind::Square));

        let removed = world.remove_shape(id);
        assert_eq!(removed.map(|s| s.pos), Some(Vec2::new(2.0, 2.0)));
        assert!(world.shape(id).is_none());
        assert!(world.remove_shape(id).is_none());
    }

    #[test]
    fn test_loader_clamp_bounds() {
        let bounds = Bounds::default();
        assert_eq!(bounds.loader_max(), Vec2::new(14.0, 13.0));
        assert_eq!(
            bounds.clamp_loader(Vec2::new(-3.0, 20.0)),
            Vec2::new(0.0, 13.0)
        );
    }

    #[test]
    fn test_truck_delivery_slot_tracks_queue() {
        let mut truck = Truck::new(
            TRUCK_START,
            [DemandTag::CircleNeeded, DemandTag::SquareNeeded],
        );
        assert_eq!(truck.delivery_slot(), Vec2::new(5.0, 13.0));
        truck.shapes_needed.pop_front();
        assert_eq!(truck.delivery_slot(), Vec2::new(6.0, 13.0));
    }

    #[test]
    fn test_truck_depart_once() {
        let mut truck = Truck::new(TRUCK_START, Vec::new());
        assert!(truck.depart());
        assert!(!truck.depart());
        assert_eq!(truck.phase, TruckPhase::Departing);
        assert_eq!(truck.vel, DEPART_VELOCITY);
    }
}
