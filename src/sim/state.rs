//! Session state and core simulation types
//!
//! A `Session` is everything that exists between entering Play and reaching
//! GameOver. It is never persisted.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Arena, cells_overlap};
use super::snake::Snake;
use super::spawn::SpawnScheduler;
use crate::config::GameConfig;
use crate::score::ScoreTracker;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Scores a point and grows the snake
    Food,
    /// Ends the session on contact
    Hazard,
}

/// An item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub pos: IVec2,
    pub kind: ItemKind,
}

impl Item {
    pub fn food(pos: IVec2) -> Self {
        Self {
            pos,
            kind: ItemKind::Food,
        }
    }

    pub fn hazard(pos: IVec2) -> Self {
        Self {
            pos,
            kind: ItemKind::Hazard,
        }
    }
}

/// Live items, regenerated as a whole when the food runs out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Items {
    pub food: Vec<Item>,
    pub hazards: Vec<Item>,
}

impl Items {
    pub fn clear(&mut self) {
        self.food.clear();
        self.hazards.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.hazards.is_empty()
    }

    /// Index of the first food item covering `pos`
    pub fn food_at(&self, pos: IVec2, cell_size: i32) -> Option<usize> {
        self.food
            .iter()
            .position(|f| cells_overlap(pos, f.pos, cell_size))
    }

    /// Whether any hazard covers `pos`
    pub fn hazard_at(&self, pos: IVec2, cell_size: i32) -> bool {
        self.hazards
            .iter()
            .any(|h| cells_overlap(pos, h.pos, cell_size))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.food.iter().chain(self.hazards.iter())
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Head ran into the body
    SelfCollision,
    /// Head touched a hazard
    Hazard,
}

/// One play attempt
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub arena: Arena,
    pub snake: Snake,
    pub items: Items,
    pub score: ScoreTracker,
    pub spawner: SpawnScheduler,
    /// Simulation ticks executed
    pub ticks: u64,
    /// Set once the session is over; further ticks are no-ops
    pub death: Option<DeathCause>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Start a session at wall time `now` (seconds)
    ///
    /// The first batch of items is placed immediately so the board is never
    /// empty on the first frame.
    pub fn new(config: &GameConfig, seed: u64, now: f64) -> Self {
        let arena = config.arena();
        let mut session = Self {
            seed,
            arena,
            snake: Snake::new(&arena),
            items: Items::default(),
            score: ScoreTracker::start(now),
            spawner: SpawnScheduler::from_config(config),
            ticks: 0,
            death: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.respawn_items(0.0);
        session
    }

    /// Replace all items using the density for `elapsed` seconds of play
    pub fn respawn_items(&mut self, elapsed: f32) {
        let occupied: Vec<IVec2> = self.snake.segments().collect();
        self.spawner
            .spawn(&mut self.rng, elapsed, &occupied, &mut self.items);
    }

    pub fn is_over(&self) -> bool {
        self.death.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_first_food() {
        let session = Session::new(&GameConfig::default(), 7, 0.0);
        assert_eq!(session.snake.len(), 2);
        assert_eq!(session.items.food.len(), 1);
        assert!(session.items.hazards.is_empty());
        assert_eq!(session.score.points(), 0);
        assert!(!session.is_over());
    }

    #[test]
    fn test_items_lookup_uses_cell_overlap() {
        let items = Items {
            food: vec![Item::food(IVec2::new(100, 220)), Item::food(IVec2::new(300, 40))],
            hazards: vec![Item::hazard(IVec2::new(60, 60))],
        };
        assert_eq!(items.food_at(IVec2::new(100, 225), 20), Some(0));
        assert_eq!(items.food_at(IVec2::new(300, 40), 20), Some(1));
        assert_eq!(items.food_at(IVec2::new(320, 40), 20), None);
        assert!(items.hazard_at(IVec2::new(60, 60), 20));
        assert!(!items.hazard_at(IVec2::new(80, 60), 20));
        assert_eq!(items.iter().count(), 3);
    }
}
