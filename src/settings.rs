//! Runtime settings
//!
//! Read from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{LOADER_SPEED, MAX_FRAME_DT, SIM_DT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for world layouts (None = derive from the clock)
    pub seed: Option<u64>,
    /// Loader speed applied to directional input
    pub loader_speed: f32,

    // === Timing ===
    /// Fixed step used when not running in real time
    pub sim_dt: f32,
    /// Longest frame the simulation will accept in one tick
    pub max_frame_dt: f32,
    /// Follow the wall clock instead of stepping as fast as possible
    pub realtime: bool,

    // === Headless run limits ===
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// Stop after this many completed orders
    pub max_sessions: u32,
    /// Let the loader drive itself. The headless binary has no keyboard, so
    /// turning this off leaves the loader parked for the whole run.
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            loader_speed: LOADER_SPEED,

            sim_dt: SIM_DT,
            max_frame_dt: MAX_FRAME_DT,
            realtime: false,

            max_ticks: 60 * 60 * 10,
            max_sessions: 3,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace unusable timing/speed values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.sim_dt.is_finite() && self.sim_dt > 0.0) {
            log::warn!("sim_dt {} out of range, using {}", self.sim_dt, defaults.sim_dt);
            self.sim_dt = defaults.sim_dt;
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            log::warn!(
                "max_frame_dt {} out of range, using {}",
                self.max_frame_dt,
                defaults.max_frame_dt
            );
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if !self.loader_speed.is_finite() || self.loader_speed < 0.0 {
            log::warn!(
                "loader_speed {} out of range, using {}",
                self.loader_speed,
                defaults.loader_speed
            );
            self.loader_speed = defaults.loader_speed;
        }
        self
    }

    /// Configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
