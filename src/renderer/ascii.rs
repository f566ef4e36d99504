//! Plain-text renderer
//!
//! One character per lattice cell. Off-lattice positions (the default
//! 450px height puts the snake between rows) snap to the cell holding their
//! top-left corner.

use std::fmt::Write;

use super::Snapshot;
use crate::game::GameState;
use crate::highscores::HighScoreEntry;

const EMPTY: char = '.';
const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const HAZARD: char = 'X';

/// Render whatever screen the snapshot's state calls for
pub fn render(snapshot: &Snapshot) -> String {
    match snapshot.state {
        GameState::MainMenu => "GRID SNAKE\n[Start] [High Scores] [Settings] [Exit]\n".to_string(),
        GameState::Play => render_board(snapshot),
        GameState::Paused => {
            let mut out = render_board(snapshot);
            out.push_str("PAUSED  [Resume] [Quit to Menu]\n");
            out
        }
        GameState::GameOver => render_game_over(snapshot),
        GameState::HighScores => {
            let mut out = String::from("HIGH SCORES\n");
            out.push_str(&render_high_scores(snapshot.high_scores));
            out
        }
        GameState::Settings => format!("SETTINGS\nVolume: {}\n", snapshot.volume),
    }
}

/// Board grid followed by a status line
pub fn render_board(snapshot: &Snapshot) -> String {
    let arena = snapshot.arena;
    let (cols, rows) = (arena.columns().max(1), arena.rows().max(1));
    let mut grid = vec![vec![EMPTY; cols as usize]; rows as usize];

    let mut put = |pos, glyph| {
        let cell = arena.cell_index(pos);
        if (0..cols).contains(&cell.x) && (0..rows).contains(&cell.y) {
            grid[cell.y as usize][cell.x as usize] = glyph;
        }
    };

    if let Some(items) = snapshot.items {
        for f in &items.food {
            put(f.pos, FOOD);
        }
        for h in &items.hazards {
            put(h.pos, HAZARD);
        }
    }
    if let Some(snake) = snapshot.snake {
        // Tail first so the head wins when segments share a cell
        let segments: Vec<_> = snake.segments().collect();
        for (i, pos) in segments.iter().enumerate().rev() {
            put(*pos, if i == 0 { HEAD } else { BODY });
        }
    }

    let mut out = String::with_capacity(((cols + 1) * (rows + 1)) as usize);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    let _ = write!(
        out,
        "Score: {}  Time: {:.1}s",
        snapshot.points, snapshot.duration
    );
    if let Some(rank) = snapshot.live_rank {
        let _ = write!(out, "  Rank #{rank}");
    }
    out.push('\n');
    out
}

fn render_game_over(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "GAME OVER\nScore: {}  Time: {:.1}s\n",
        snapshot.points, snapshot.duration
    );
    if let Some(rank) = snapshot.new_high_score {
        let _ = writeln!(out, "NEW HIGH SCORE! Rank #{rank}");
    }
    out.push_str("[Back to Menu]\n");
    out
}

/// Leaderboard lines, best first
pub fn render_high_scores(entries: &[HighScoreEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet!\n".to_string();
    }
    let mut out = String::new();
    for (i, e) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. Score: {}  Time: {:.1}s  ({})",
            i + 1,
            e.points,
            e.duration,
            e.date
        );
    }
    out
}
