//! Directional input
//!
//! Keyboard capture lives in the host; this only turns the set of held
//! arrows into the loader's velocity intent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{DOWN, LEFT, RIGHT, UP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn vector(&self) -> Vec2 {
        match self {
            Direction::Left => LEFT,
            Direction::Right => RIGHT,
            Direction::Up => UP,
            Direction::Down => DOWN,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Which arrows are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    pub fn press(&mut self, dir: Direction) {
        self.set(dir, true);
    }

    pub fn release(&mut self, dir: Direction) {
        self.set(dir, false);
    }

    fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// Sum of held directions scaled by `speed` (opposites cancel)
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let held = [
            (self.left, Direction::Left),
            (self.right, Direction::Right),
            (self.up, Direction::Up),
            (self.down, Direction::Down),
        ];
        held.iter()
            .filter(|(on, _)| *on)
            .map(|(_, dir)| dir.vector())
            .sum::<Vec2>()
            * speed
    }
}
