//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One cell of movement per tick, never per frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_heading;
pub use grid::{Arena, Heading, cells_overlap, lattice_cells_covered, wrap};
pub use snake::Snake;
pub use spawn::{SpawnPlan, SpawnScheduler, food_count, hazard_count};
pub use state::{DeathCause, Item, ItemKind, Items, Session};
pub use tick::{TickOutcome, tick};
