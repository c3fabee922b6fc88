//! Shape Loader entry point
//!
//! Headless native driver: runs sessions, logs what happens, and prints the
//! final world snapshot as JSON. With `autopilot` off there is no keyboard,
//! so the loader holds still and the run idles until `max_ticks`.
//!
//! Usage: `shape-loader [settings.json]`

use std::time::Duration;

use shape_loader::platform::HeldDirections;
use shape_loader::platform::time::wall_clock;
use shape_loader::sim::SimEvent;
use shape_loader::{Session, Settings};

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = settings.resolve_seed();
    log::info!("Shape Loader (headless) starting...");

    if !settings.autopilot {
        log::info!("Autopilot off: no input attached, loader will stand still");
    }

    let mut session = Session::new(seed, &settings);
    let mut clock = wall_clock();
    let held = HeldDirections::default();

    while session.ticks() < settings.max_ticks && session.completed() < settings.max_sessions {
        let dt = if settings.realtime {
            std::thread::sleep(Duration::from_secs_f32(settings.sim_dt));
            clock.dt() as f32
        } else {
            settings.sim_dt
        };

        let outcome = if settings.autopilot {
            session.tick_autopilot(dt)
        } else {
            session.tick_held(&held, dt)
        };

        for event in &outcome.events {
            match event {
                SimEvent::PickedUp { shape, kind } => {
                    log::info!("[tick {}] scooped {:?} #{}", session.ticks(), kind, shape)
                }
                SimEvent::Delivered { kind, remaining } => log::info!(
                    "[tick {}] loaded {:?}, {} to go",
                    session.ticks(),
                    kind,
                    remaining
                ),
                SimEvent::Departed => log::info!("[tick {}] truck leaving", session.ticks()),
            }
        }
    }

    log::info!(
        "Done: {} orders filled in {} ticks (seed {})",
        session.completed(),
        session.ticks(),
        session.seed()
    );

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
