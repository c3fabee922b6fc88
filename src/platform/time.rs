//! Frame clock
//!
//! Wraps any zero-argument time source (seconds) and hands out the delta
//! between successive reads.

use std::time::Instant;

pub struct FrameTime<F: FnMut() -> f64> {
    source: F,
    last_time: f64,
}

impl<F: FnMut() -> f64> FrameTime<F> {
    /// Reads the source once to establish the starting point
    pub fn new(mut source: F) -> Self {
        let last_time = source();
        Self { source, last_time }
    }

    /// Seconds since the previous call (or since construction)
    pub fn dt(&mut self) -> f64 {
        let now = (self.source)();
        let delta = now - self.last_time;
        self.last_time = now;
        delta
    }
}

/// Monotonic wall clock, seconds since the first call
pub fn wall_clock() -> FrameTime<impl FnMut() -> f64> {
    let start = Instant::now();
    FrameTime::new(move || start.elapsed().as_secs_f64())
}
