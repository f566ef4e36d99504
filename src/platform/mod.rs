//! Platform abstraction layer
//!
//! Handles the boundary with whatever drives the game:
//! - Input events sampled once per frame
//! - Time (wall clock or a stepped clock for headless runs)

pub mod input;
pub mod time;

pub use input::{FrameInput, MenuChoice};
pub use time::{Clock, SteppedClock, SystemClock};
