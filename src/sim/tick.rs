//! Per-tick simulation
//!
//! A tick is always `World::update` (detect, assign intent) followed by
//! `World::step` (integrate, commit dock events). Nothing is committed in
//! `update`, so detection always sees the state the last step left behind.

use glam::Vec2;

use super::state::{Bounds, Loader, Shape, SimEvent, Truck, World};
use crate::consts::*;
use crate::manhattan_distance;

/// Input intent for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Loader velocity (already scaled by loader speed)
    pub velocity: Vec2,
    /// Bucket offset to hold when nothing is being scooped or dropped
    pub bucket_offset: Vec2,
}

/// Run one full tick: update then step
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> Vec<SimEvent> {
    world.update(input.velocity, input.bucket_offset);
    world.step(dt)
}

impl World {
    /// Refresh loader intent and pickup/delivery candidates
    pub fn update(&mut self, velocity: Vec2, bucket_offset: Vec2) {
        let loader = &mut self.loader;
        loader.vel = velocity;
        loader.bucket_rest = bucket_offset;
        let pos = loader.pos;

        // Only the kind at the head of the order can be scooped; first match in
        // floor order wins.
        loader.nearby_shape = match (loader.carried_shape, self.truck.next_needed()) {
            (None, Some(needed)) => self
                .shapes
                .iter()
                .find(|shape| {
                    shape.kind == needed
                        && manhattan_distance(shape.pos + APPROACH_OFFSET, pos)
                            <= PROXIMITY_THRESHOLD
                })
                .map(|shape| shape.id),
            _ => None,
        };

        let slot = self.truck.delivery_slot();
        loader.nearby_needed_slot = if loader.carried_shape.is_some()
            && !self.truck.shapes_needed.is_empty()
            && manhattan_distance(slot + APPROACH_OFFSET, pos) <= PROXIMITY_THRESHOLD
        {
            Some(slot)
        } else {
            None
        };
    }

    /// Advance the world by `dt` seconds, returning what happened
    pub fn step(&mut self, dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let World {
            loader,
            truck,
            shapes,
            bounds,
            ..
        } = self;

        loader.step(dt, bounds, shapes, truck, &mut events);
        truck.step(dt);

        events
    }
}

impl Truck {
    pub fn step(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

impl Loader {
    /// Move, swing the bucket, and resolve dock events
    pub fn step(
        &mut self,
        dt: f32,
        bounds: &Bounds,
        shapes: &mut Vec<Shape>,
        truck: &mut Truck,
        events: &mut Vec<SimEvent>,
    ) {
        self.pos = bounds.clamp_loader(self.pos + self.vel * dt);

        let desired = self.desired_bucket_offset(shapes);
        if self.move_bucket(desired, dt) {
            self.dock(shapes, truck, events);
        }

        if truck.shapes_needed.is_empty() {
            if truck.depart() {
                log::info!("Order complete, truck departing");
                events.push(SimEvent::Departed);
            }
            self.pos = bounds.clamp_loader(truck.pos + PARKING_OFFSET);
        }
    }

    /// Where the bucket wants to be this tick, relative to the body
    pub fn desired_bucket_offset(&self, shapes: &[Shape]) -> Vec2 {
        let target = match (self.nearby_shape, self.nearby_needed_slot) {
            (Some(id), _) => shapes.iter().find(|s| s.id == id).map(|s| s.pos),
            (None, slot) => slot,
        };

        match target {
            Some(point) => point - PICKUP_ANCHOR - self.pos,
            None => self.bucket_rest,
        }
    }

    /// Move the bucket toward `desired` at bucket speed, snapping once it is
    /// within one step. Returns true when the bucket sits exactly on target.
    pub fn move_bucket(&mut self, desired: Vec2, dt: f32) -> bool {
        let error = desired - self.bucket_offset;
        if error != Vec2::ZERO {
            match error.try_normalize() {
                Some(dir) => {
                    let step = dir * (BUCKET_SPEED * dt);
                    if self.bucket_offset.distance(desired) < step.length() {
                        self.bucket_offset = desired;
                    } else {
                        self.bucket_offset += step;
                    }
                }
                // Too small to normalize
                None => self.bucket_offset = desired,
            }
        }
        self.bucket_offset == desired
    }

    fn dock(&mut self, shapes: &mut Vec<Shape>, truck: &mut Truck, events: &mut Vec<SimEvent>) {
        if let Some(id) = self.nearby_shape.take() {
            let Some(index) = shapes.iter().position(|s| s.id == id) else {
                log::error!("Tracked shape {} is no longer on the floor", id);
                return;
            };
            debug_assert!(self.carried_shape.is_none());
            let shape = shapes.remove(index);
            log::debug!("Picked up {:?} #{}", shape.kind, shape.id);
            self.carried_shape = Some(shape.kind);
            events.push(SimEvent::PickedUp {
                shape: shape.id,
                kind: shape.kind,
            });
        } else if self.nearby_needed_slot.take().is_some() {
            self.deliver(truck, events);
        }
    }

    fn deliver(&mut self, truck: &mut Truck, events: &mut Vec<SimEvent>) {
        let Some(kind) = self.carried_shape else {
            log::error!("Delivery docked with an empty bucket");
            return;
        };
        debug_assert!(!truck.shapes_needed.is_empty());
        if truck.shapes_needed.pop_front().is_none() {
            log::error!("Delivery docked but the truck needs nothing");
            return;
        }

        self.carried_shape = None;
        truck.shapes_loaded.push(kind);
        let remaining = truck.shapes_needed.len();
        log::debug!("Delivered {:?}, {} left in the order", kind, remaining);
        events.push(SimEvent::Delivered { kind, remaining });

        if remaining == 0 && truck.depart() {
            log::info!("Order complete, truck departing");
            events.push(SimEvent::Departed);
        }
    }
}
