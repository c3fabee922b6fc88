//! Demo mode - the loader plays itself
//!
//! Walks to the nearest shape the truck wants, waits for the bucket to scoop
//! it, then walks to the drop point and waits again.

use glam::Vec2;

use super::state::World;
use super::tick::TickInput;
use crate::consts::{APPROACH_OFFSET, PROXIMITY_THRESHOLD};
use crate::manhattan_distance;

/// Stop this close to the standing point so the bucket can settle
const ARRIVE_DISTANCE: f32 = PROXIMITY_THRESHOLD * 0.5;

/// Where the loader should stand next, if anywhere
pub fn standing_point(world: &World) -> Option<Vec2> {
    if world.truck.shapes_needed.is_empty() {
        return None;
    }
    let here = world.loader.pos;

    if world.loader.carried_shape.is_some() {
        return Some(world.truck.delivery_slot() + APPROACH_OFFSET);
    }

    let needed = world.truck.next_needed()?;
    world
        .shapes
        .iter()
        .filter(|s| s.kind == needed)
        .map(|s| s.pos + APPROACH_OFFSET)
        .min_by(|a, b| {
            manhattan_distance(*a, here)
                .partial_cmp(&manhattan_distance(*b, here))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Input for the next tick
pub fn steer(world: &World, speed: f32, dt: f32) -> TickInput {
    let here = world.loader.pos;
    let velocity = match standing_point(world) {
        Some(target) if manhattan_distance(target, here) > ARRIVE_DISTANCE => {
            let delta = target - here;
            // Don't step past the target on long frames
            let max_speed = if dt > 0.0 { delta.length() / dt } else { speed };
            delta.normalize_or_zero() * speed.min(max_speed)
        }
        _ => Vec2::ZERO,
    };

    TickInput {
        velocity,
        bucket_offset: Vec2::ZERO,
    }
}
