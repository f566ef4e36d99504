//! Rendering module
//!
//! The game core never draws. Each frame it hands out a read-only
//! `Snapshot`; a front end turns that into pixels (or, for the headless
//! binary, text via `ascii`).

pub mod ascii;

use crate::game::GameState;
use crate::highscores::HighScoreEntry;
use crate::sim::{Arena, Items, Snake};

pub use ascii::{render, render_board, render_high_scores};

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub arena: Arena,
    /// Present from Play entry until the session is dropped
    pub snake: Option<&'a Snake>,
    pub items: Option<&'a Items>,
    pub points: u32,
    /// Active seconds
    pub duration: f32,
    /// 0 - 100
    pub volume: u8,
    pub high_scores: &'a [HighScoreEntry],
    /// Rank (1-indexed) the last finished session earned, if any
    pub new_high_score: Option<usize>,
    /// Rank the running session would take if it ended now
    pub live_rank: Option<usize>,
}
