//! Randomized floor layout and truck order
//!
//! Only used when a world is created. The RNG is always passed in so a seeded
//! generator reproduces the same session.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{DemandTag, ShapeKind};
use crate::consts::{GRID_XS, GRID_YS};

/// All candidate floor positions, column by column
pub fn grid_positions() -> Vec<Vec2> {
    GRID_XS
        .iter()
        .flat_map(|&x| GRID_YS.iter().map(move |&y| Vec2::new(x as f32, y as f32)))
        .collect()
}

/// Shuffle the grid and hand out `per_kind` rounds of every shape kind.
///
/// Each round places one shape of each kind, in [`ShapeKind::ALL`] order.
pub fn floor_layout<R: Rng + ?Sized>(rng: &mut R, per_kind: usize) -> Vec<(Vec2, ShapeKind)> {
    let mut positions = grid_positions();
    positions.shuffle(rng);

    let wanted = per_kind * ShapeKind::ALL.len();
    if wanted > positions.len() {
        log::warn!(
            "Floor grid has {} cells, {} shapes requested; truncating",
            positions.len(),
            wanted
        );
    }

    (0..per_kind)
        .flat_map(|_| ShapeKind::ALL)
        .zip(positions)
        .map(|(kind, pos)| (pos, kind))
        .collect()
}

/// Draw an order of `count` tags, kinds sampled independently (repeats allowed)
pub fn draw_demand<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DemandTag> {
    (0..count)
        .map(|_| {
            let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
            DemandTag::for_shape(kind)
        })
        .collect()
}
