//! Clocks
//!
//! The game only ever sees seconds as `f64`. Real runs use the monotonic
//! system clock; headless runs advance a fixed step per frame so a session
//! plays out identically regardless of host speed.

use std::time::Instant;

/// Source of "now" in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Monotonic wall clock, zeroed at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct SteppedClock {
    now: f64,
    step: f64,
}

impl SteppedClock {
    pub fn new(step: f64) -> Self {
        Self { now: 0.0, step }
    }

    /// Move forward one step
    pub fn advance(&mut self) -> f64 {
        self.now += self.step;
        self.now
    }

    /// Move forward an arbitrary amount
    pub fn advance_by(&mut self, seconds: f64) -> f64 {
        self.now += seconds;
        self.now
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> f64 {
        self.now
    }
}
