//! Grid Snake - a grid arcade snake game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (movement, collisions, spawning)
//! - `game`: Top-level state machine (menu, play, pause, game over, high scores)
//! - `score`: Per-session points and active play time
//! - `highscores`: Ranked, capacity-bounded leaderboard and its store
//! - `config` / `settings`: Runtime configuration and player preferences
//! - `audio`, `renderer`, `platform`: Seams towards the outside world

pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, ConfigLoadError, GameConfig};
pub use game::{Game, GameEvent, GameState};
pub use highscores::{FileStore, HighScoreEntry, HighScoreStore, HighScores, MemoryStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (movement, collisions, growth, spawning)
    pub const TICK_RATE_HZ: f32 = 15.0;
    /// Render/input polling rate
    pub const FRAME_RATE_HZ: f32 = 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 450;
    /// Edge length of one grid cell; also the length of one move
    pub const CELL_SIZE: i32 = 20;

    /// Segments a fresh snake starts with
    pub const INITIAL_SNAKE_LEN: usize = 2;

    /// Upper bound on simultaneous food items
    pub const MAX_FOOD: usize = 6;
    /// Seconds of active play per extra food item
    pub const FOOD_INTERVAL_SECS: f32 = 10.0;
    /// Sampling attempts allowed per item before giving up on it
    pub const SPAWN_ATTEMPTS_PER_ITEM: u32 = 256;

    /// Leaderboard size
    pub const HIGH_SCORE_CAPACITY: usize = 3;
}
