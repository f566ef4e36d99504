//! Item spawning
//!
//! The board gets busier the longer a session lasts: one extra food item per
//! `food_interval_secs` of active play up to `max_food`, plus hazards once
//! there is more than one food item.
//!
//! Placement samples random lattice cells. Every food item reserves its
//! 8 neighbours so hazards never spawn touching food. Attempts are capped per
//! item; a crowded board yields fewer items instead of hanging.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;

use super::grid::{Arena, lattice_cells_covered};
use super::state::{Item, Items};
use crate::config::GameConfig;

/// Food items wanted after `elapsed` seconds of active play
pub fn food_count(elapsed: f32, interval: f32, max_food: usize) -> usize {
    let steps = (elapsed.max(0.0) / interval).floor() as usize;
    steps.saturating_add(1).min(max_food)
}

/// Hazards wanted alongside `food` food items
pub fn hazard_count(food: usize) -> usize {
    if food > 1 { food / 2 } else { 0 }
}

/// How many items of each kind a spawn should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPlan {
    pub food: usize,
    pub hazards: usize,
}

/// Decides item counts and places items on free cells
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    arena: Arena,
    max_food: usize,
    food_interval_secs: f32,
    hazards_enabled: bool,
    attempts_per_item: u32,
}

impl SpawnScheduler {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            arena: config.arena(),
            max_food: config.max_food,
            food_interval_secs: config.food_interval_secs,
            hazards_enabled: config.hazards_enabled,
            attempts_per_item: config.spawn_attempts_per_item,
        }
    }

    /// Item counts for `elapsed` seconds of active play
    pub fn plan(&self, elapsed: f32) -> SpawnPlan {
        let food = food_count(elapsed, self.food_interval_secs, self.max_food);
        let hazards = if self.hazards_enabled {
            hazard_count(food)
        } else {
            0
        };
        SpawnPlan { food, hazards }
    }

    /// Clear `items` and place a fresh set avoiding `occupied` positions
    ///
    /// Returns what was actually placed, which may fall short of the plan on
    /// a crowded board.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        elapsed: f32,
        occupied: &[IVec2],
        items: &mut Items,
    ) -> SpawnPlan {
        let plan = self.plan(elapsed);
        let cell = self.arena.cell_size;

        let mut taken: HashSet<IVec2> = occupied
            .iter()
            .flat_map(|&pos| lattice_cells_covered(pos, cell))
            .collect();

        items.clear();

        // Food first, so hazards cannot land next to it
        for _ in 0..plan.food {
            let Some(pos) = self.sample_free(rng, &taken) else {
                log::debug!(
                    "Food placement gave up after {} attempts ({} of {} placed)",
                    self.attempts_per_item,
                    items.food.len(),
                    plan.food
                );
                break;
            };
            items.food.push(Item::food(pos));
            for dy in -1..=1 {
                for dx in -1..=1 {
                    taken.insert(self.arena.wrap(pos + IVec2::new(dx, dy) * cell));
                }
            }
        }

        for _ in 0..plan.hazards {
            let Some(pos) = self.sample_free(rng, &taken) else {
                log::debug!(
                    "Hazard placement gave up after {} attempts ({} of {} placed)",
                    self.attempts_per_item,
                    items.hazards.len(),
                    plan.hazards
                );
                break;
            };
            items.hazards.push(Item::hazard(pos));
            taken.insert(pos);
        }

        let placed = SpawnPlan {
            food: items.food.len(),
            hazards: items.hazards.len(),
        };
        log::debug!(
            "Spawned {} food, {} hazards at t={:.1}s",
            placed.food,
            placed.hazards,
            elapsed
        );
        placed
    }

    /// Random free lattice cell, or None once the attempt budget is spent
    fn sample_free<R: Rng + ?Sized>(&self, rng: &mut R, taken: &HashSet<IVec2>) -> Option<IVec2> {
        let (cols, rows) = (self.arena.columns(), self.arena.rows());
        if cols <= 0 || rows <= 0 {
            return None;
        }
        (0..self.attempts_per_item).find_map(|_| {
            let pos = IVec2::new(
                rng.random_range(0..cols) * self.arena.cell_size,
                rng.random_range(0..rows) * self.arena.cell_size,
            );
            (!taken.contains(&pos)).then_some(pos)
        })
    }
}
