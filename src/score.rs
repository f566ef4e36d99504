//! Session score and active play time
//!
//! All timestamps are wall-clock seconds from the caller's clock. Time spent
//! paused is tracked separately and never counts towards the duration.

use serde::{Deserialize, Serialize};

/// Points and active duration for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    points: u32,
    /// Active seconds as of the last `tick`
    duration: f32,
    started_at: f64,
    paused_total: f64,
    pause_started: Option<f64>,
    finished: bool,
}

impl ScoreTracker {
    /// New tracker with zero points, started at `now`
    pub fn start(now: f64) -> Self {
        Self {
            points: 0,
            duration: 0.0,
            started_at: now,
            paused_total: 0.0,
            pause_started: None,
            finished: false,
        }
    }

    pub fn record_point(&mut self) {
        self.points += 1;
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Active duration as of the last update
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Active seconds at `now`, excluding all paused time
    ///
    /// While paused the clock is frozen at the moment the pause began.
    pub fn active_at(&self, now: f64) -> f32 {
        let end = self.pause_started.unwrap_or(now);
        (end - self.started_at - self.paused_total).max(0.0) as f32
    }

    /// Refresh the duration field from the clock
    pub fn tick(&mut self, now: f64) -> f32 {
        if !self.finished {
            self.duration = self.active_at(now);
        }
        self.duration
    }

    /// Freeze the clock; a second pause is ignored
    pub fn pause(&mut self, now: f64) {
        if self.pause_started.is_none() && !self.finished {
            self.tick(now);
            self.pause_started = Some(now);
        }
    }

    /// Resume the clock, discounting the time since `pause`
    pub fn resume(&mut self, now: f64) {
        if let Some(started) = self.pause_started.take() {
            self.paused_total += (now - started).max(0.0);
            self.tick(now);
        }
    }

    /// Final update; the duration no longer changes afterwards
    pub fn finish(&mut self, now: f64) -> f32 {
        self.resume(now);
        self.tick(now);
        self.finished = true;
        self.duration
    }
}
