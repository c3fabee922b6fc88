//! Game session
//!
//! Owns the current world and the layout RNG. The host feeds it input and
//! frame deltas; once the truck has driven off the floor a new world is
//! dealt from the same RNG stream.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Settings;
use crate::platform::HeldDirections;
use crate::sim::{Bounds, SimEvent, Snapshot, TickInput, World, autopilot, tick};

/// Result of one session tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOutcome {
    pub events: Vec<SimEvent>,
    /// A fresh world was dealt at the end of this tick
    pub restarted: bool,
}

pub struct Session {
    world: World,
    rng: Pcg32,
    seed: u64,
    bounds: Bounds,
    loader_speed: f32,
    max_frame_dt: f32,
    /// Orders completed (worlds replaced)
    completed: u32,
    ticks: u64,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let bounds = Bounds::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::create(bounds, &mut rng);
        log::info!("Session started with seed {}", seed);

        Self {
            world,
            rng,
            seed,
            bounds,
            loader_speed: settings.loader_speed,
            max_frame_dt: settings.max_frame_dt,
            completed: 0,
            ticks: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame with explicit intent
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> SessionOutcome {
        let dt = self.frame_dt(dt);
        self.advance(input, dt)
    }

    /// Advance one frame from held arrow keys
    pub fn tick_held(&mut self, held: &HeldDirections, dt: f32) -> SessionOutcome {
        let input = TickInput {
            velocity: held.velocity(self.loader_speed),
            ..Default::default()
        };
        self.tick(&input, dt)
    }

    /// Advance one frame with the loader driving itself
    pub fn tick_autopilot(&mut self, dt: f32) -> SessionOutcome {
        let dt = self.frame_dt(dt);
        let input = autopilot::steer(&self.world, self.loader_speed, dt);
        self.advance(&input, dt)
    }

    /// Throw away the current world and deal a new one.
    ///
    /// Does not count as a completed order.
    pub fn restart(&mut self) {
        self.world = World::create(self.bounds, &mut self.rng);
        log::info!("Session reset, fresh world dealt");
    }

    /// Update then step with an already clamped `dt`
    fn advance(&mut self, input: &TickInput, dt: f32) -> SessionOutcome {
        let events = tick(&mut self.world, input, dt);
        self.ticks += 1;

        let restarted = self.world.truck_gone();
        if restarted {
            self.completed += 1;
            self.world = World::create(self.bounds, &mut self.rng);
            log::info!("Truck gone, dealing world #{}", self.completed + 1);
        }

        SessionOutcome { events, restarted }
    }

    fn frame_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() || dt < 0.0 {
            log::warn!("Ignoring bad frame delta {}", dt);
            return 0.0;
        }
        dt.min(self.max_frame_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{RESTART_X, SIM_DT};
    use crate::sim::TruckPhase;

    fn session(seed: u64) -> Session {
        Session::new(seed, &Settings::default())
    }

    #[test]
    fn test_restart_when_truck_leaves() {
        let mut session = session(5);
        session.world.truck.shapes_needed.clear();

        let mut restarted_at = None;
        for i in 0..2000 {
            let outcome = session.tick(&TickInput::default(), SIM_DT);
            if outcome.restarted {
                restarted_at = Some(i);
                break;
            }
            assert!(session.world().truck.pos.x >= RESTART_X);
        }

        assert!(restarted_at.is_some());
        assert_eq!(session.completed(), 1);
        assert_eq!(session.world().truck.phase, TruckPhase::Idle);
        assert_eq!(session.world().truck.shapes_needed.len(), 4);
        assert_eq!(session.world().shapes.len(), 16);
    }

    #[test]
    fn test_frame_dt_is_clamped() {
        let mut session = session(5);
        session.world.truck.vel = glam::Vec2::new(-1.0, 0.0);
        let start = session.world().truck.pos;

        session.tick(&TickInput::default(), 5.0);
        let moved = start.x - session.world().truck.pos.x;
        assert!((moved - Settings::default().max_frame_dt).abs() < 1e-5);

        let before = session.world().truck.pos;
        session.tick(&TickInput::default(), -1.0);
        session.tick(&TickInput::default(), f32::NAN);
        assert_eq!(session.world().truck.pos, before);
    }

    #[test]
    fn test_held_keys_move_loader() {
        let mut session = session(5);
        let start = session.world().loader.pos;
        let mut held = HeldDirections::default();
        held.press(crate::platform::Direction::Left);

        session.tick_held(&held, 0.1);
        let moved = start - session.world().loader.pos;
        assert!((moved.x - 0.2).abs() < 1e-5);
        assert!(moved.y.abs() < 1e-5);
    }

    #[test]
    fn test_held_keys_long_frame_is_capped() {
        let settings = Settings::default();
        let mut session = session(5);
        let start = session.world().loader.pos;
        let mut held = HeldDirections::default();
        held.press(crate::platform::Direction::Left);

        session.tick_held(&held, 0.5);
        let moved = start.x - session.world().loader.pos.x;
        assert!((moved - settings.loader_speed * settings.max_frame_dt).abs() < 1e-5);
    }

    #[test]
    fn test_autopilot_frame_dt_is_clamped() {
        let settings = Settings::default();
        let mut session = session(5);
        let start = session.world().loader.pos;

        session.tick_autopilot(5.0);
        let moved = start.distance(session.world().loader.pos);
        assert!(moved <= settings.loader_speed * settings.max_frame_dt + 1e-5);

        let before = session.world().loader.pos;
        session.tick_autopilot(f32::NAN);
        session.tick_autopilot(-1.0);
        assert_eq!(session.world().loader.pos, before);
        assert_eq!(session.ticks(), 3);
    }

    #[test]
    fn test_no_held_keys_holds_loader_still() {
        let mut session = session(5);
        let start = session.world().loader.pos;
        let held = HeldDirections::default();

        for _ in 0..600 {
            let outcome = session.tick_held(&held, SIM_DT);
            assert!(!outcome.restarted);
        }
        assert_eq!(session.world().loader.pos, start);
        assert_eq!(session.completed(), 0);
    }

    #[test]
    fn test_manual_restart_is_not_a_completed_order() {
        let mut session = session(5);
        session.restart();
        assert_eq!(session.completed(), 0);
        assert_eq!(session.world().truck.shapes_needed.len(), 4);
        assert_eq!(session.world().shapes.len(), 16);
    }

    #[test]
    fn test_autopilot_completes_an_order() {
        let mut session = session(2024);
        let order = session.world().truck.shapes_needed.clone();

        let mut picked = 0;
        let mut delivered = Vec::new();
        let mut departed = false;
        let mut restarted = false;
        for _ in 0..30_000 {
            let outcome = session.tick_autopilot(SIM_DT);
            for event in &outcome.events {
                match event {
                    SimEvent::PickedUp { .. } => picked += 1,
                    SimEvent::Delivered { kind, .. } => delivered.push(*kind),
                    SimEvent::Departed => departed = true,
                }
            }
            if outcome.restarted {
                restarted = true;
                break;
            }
        }

        assert!(restarted, "order was never completed");
        assert!(departed);
        assert_eq!(picked, 4);
        let expected: Vec<_> = order.iter().map(|tag| tag.shape_kind()).collect();
        assert_eq!(delivered, expected);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = session(31);
        let mut b = session(31);
        for _ in 0..600 {
            a.tick_autopilot(SIM_DT);
            b.tick_autopilot(SIM_DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.ticks(), 600);
    }
}
