//! Runtime game configuration
//!
//! Defaults mirror `consts`; every value can be overridden before a `Game`
//! is built. Validation happens once, at construction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Arena;

/// Configuration errors (only raised while bootstrapping)
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    #[error("playfield {width}x{height} cannot hold a {cell_size}px cell grid with a snake")]
    PlayfieldTooSmall {
        width: i32,
        height: i32,
        cell_size: i32,
    },

    #[error("{name} rate must be positive, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("food interval must be a positive number of seconds, got {0}")]
    InvalidFoodInterval(f32),

    #[error("max food must be at least 1")]
    ZeroMaxFood,

    #[error("high score capacity must be at least 1")]
    ZeroCapacity,
}

/// Errors reading a config file
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a valid config: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Tunable game parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: i32,
    /// Playfield height in pixels
    pub height: i32,
    /// Grid pitch in pixels
    pub cell_size: i32,
    /// Simulation ticks per second
    pub tick_rate: f32,
    /// Frames per second the outer loop targets
    pub frame_rate: f32,
    /// Cap on simultaneous food items
    pub max_food: usize,
    /// Active seconds per additional food item
    pub food_interval_secs: f32,
    /// Whether hazards spawn alongside food
    pub hazards_enabled: bool,
    /// Sampling attempts per item before the spawner gives up on it
    pub spawn_attempts_per_item: u32,
    /// Number of leaderboard entries kept
    pub high_score_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            tick_rate: TICK_RATE_HZ,
            frame_rate: FRAME_RATE_HZ,
            max_food: MAX_FOOD,
            food_interval_secs: FOOD_INTERVAL_SECS,
            hazards_enabled: true,
            spawn_attempts_per_item: SPAWN_ATTEMPTS_PER_ITEM,
            high_score_capacity: HIGH_SCORE_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        // Two horizontal segments must fit, and wrap needs bound >= cell
        if self.width < self.cell_size * INITIAL_SNAKE_LEN as i32 || self.height < self.cell_size
        {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }
        for (name, value) in [("tick", self.tick_rate), ("frame", self.frame_rate)] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if !self.food_interval_secs.is_finite() || self.food_interval_secs <= 0.0 {
            return Err(ConfigError::InvalidFoodInterval(self.food_interval_secs));
        }
        if self.max_food == 0 {
            return Err(ConfigError::ZeroMaxFood);
        }
        if self.high_score_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Read a JSON config (missing fields take defaults) and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Seconds per rendered frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Playfield geometry
    pub fn arena(&self) -> Arena {
        Arena::new(self.width, self.height, self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!((config.tick_dt() - 1.0 / 15.0).abs() < 1e-6);
        assert!((config.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCellSize(0)));

        let config = GameConfig {
            width: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlayfieldTooSmall { .. })
        ));

        let config = GameConfig {
            tick_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "tick", .. })
        ));

        let config = GameConfig {
            high_score_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_rejects_bad_food_settings() {
        for interval in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let config = GameConfig {
                food_interval_secs: interval,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidFoodInterval(_))),
                "{interval}"
            );
        }

        let config = GameConfig {
            max_food: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxFood));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"max_food": 3}"#).unwrap();
        assert_eq!(GameConfig::load(&good).unwrap().max_food, 3);

        let zero_interval = dir.path().join("zero.json");
        fs::write(&zero_interval, r#"{"food_interval_secs": 0.0}"#).unwrap();
        assert!(matches!(
            GameConfig::load(&zero_interval),
            Err(ConfigLoadError::Invalid(ConfigError::InvalidFoodInterval(_)))
        ));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{ nope").unwrap();
        assert!(matches!(
            GameConfig::load(&garbage),
            Err(ConfigLoadError::Json { .. })
        ));

        assert!(matches!(
            GameConfig::load(&dir.path().join("missing.json")),
            Err(ConfigLoadError::Io { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"hazards_enabled": false}"#).unwrap();
        assert!(!config.hazards_enabled);
        assert_eq!(config.cell_size, CELL_SIZE);
    }
}
