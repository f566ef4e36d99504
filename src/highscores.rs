//! High score leaderboard
//!
//! A short ranked list (best first) of finished sessions. Ranking is by points,
//! then by the faster time. The list is loaded once at startup and written
//! back through a `HighScoreStore` right after every admitted entry.
//!
//! On-disk format: headerless CSV, one `points,duration,date` record per
//! entry in rank order, e.g. `42,63.5,2024-06-01`.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HIGH_SCORE_CAPACITY;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Food eaten
    pub points: u32,
    /// Active play time in seconds
    pub duration: f32,
    /// Day the session ended, `YYYY-MM-DD`
    pub date: String,
}

impl HighScoreEntry {
    pub fn new(points: u32, duration: f32, date: NaiveDate) -> Self {
        Self {
            points,
            duration,
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Entry stamped with today's local date
    pub fn today(points: u32, duration: f32) -> Self {
        Self::new(points, duration, chrono::Local::now().date_naive())
    }

    /// Build an entry from one CSV record; None for anything malformed
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() != 3 {
            return None;
        }
        let (points, duration, date): (u32, f32, String) = record.deserialize(None).ok()?;
        if !duration.is_finite() || duration < 0.0 {
            return None;
        }
        NaiveDate::parse_from_str(&date, DATE_FORMAT).ok()?;
        Some(Self {
            points,
            duration,
            date,
        })
    }

    fn to_fields(&self) -> [String; 3] {
        [
            self.points.to_string(),
            format!("{:.1}", self.duration),
            self.date.clone(),
        ]
    }

    /// Leaderboard order: more points first, then the faster time
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| self.duration.total_cmp(&other.duration))
    }
}

/// Store errors (saving only; loading never fails)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] csv::Error),

    #[error("failed to write high scores to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse headerless CSV into entries, plus the number of rows skipped
pub fn read_records(data: &[u8]) -> (Vec<HighScoreEntry>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut entries = Vec::new();
    let mut skipped = 0;
    for result in reader.records() {
        match result.ok().as_ref().and_then(HighScoreEntry::from_record) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }
    (entries, skipped)
}

/// Encode entries as headerless CSV, durations to one decimal
pub fn write_records(entries: &[HighScoreEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for entry in entries {
        writer.write_record(entry.to_fields())?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Where the leaderboard lives between runs
pub trait HighScoreStore {
    /// Stored entries; missing or unreadable storage yields an empty list
    fn load(&self) -> Vec<HighScoreEntry>;
    /// Replace the stored list with `entries`
    fn save(&self, entries: &[HighScoreEntry]) -> Result<(), StoreError>;
}

/// Headerless CSV file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Vec<HighScoreEntry> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        let (entries, skipped) = read_records(&data);
        if skipped > 0 {
            log::warn!("Skipped {skipped} malformed high score rows");
        }
        log::info!("Loaded {} high scores", entries.len());
        entries
    }

    fn save(&self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        let data = write_records(entries)?;
        fs::write(&self.path, data).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}

/// In-memory store; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<Vec<HighScoreEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }

    /// What the last save wrote
    pub fn snapshot(&self) -> Vec<HighScoreEntry> {
        self.entries.borrow().clone()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Vec<HighScoreEntry> {
        self.snapshot()
    }

    fn save(&self, entries: &[HighScoreEntry]) -> Result<(), StoreError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(HIGH_SCORE_CAPACITY)
    }
}

impl HighScores {
    /// Create empty leaderboard holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Leaderboard from arbitrary entries: ranked and trimmed
    pub fn from_entries(entries: Vec<HighScoreEntry>, capacity: usize) -> Self {
        let mut scores = Self::new(capacity);
        scores.entries = entries;
        scores.entries.sort_by(HighScoreEntry::rank_cmp);
        scores.entries.truncate(scores.capacity);
        scores
    }

    /// Load from a store (never fails; bad data just means fewer entries)
    pub fn load(store: &dyn HighScoreStore, capacity: usize) -> Self {
        Self::from_entries(store.load(), capacity)
    }

    /// Write the current list; failures are logged, not surfaced
    pub fn save(&self, store: &dyn HighScoreStore) -> bool {
        match store.save(&self.entries) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, points: u32) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        // Must beat the lowest entry outright
        self.entries.last().is_none_or(|e| points > e.points)
    }

    /// The rank (1-indexed) a session would get, or None if it doesn't qualify
    pub fn potential_rank(&self, points: u32, duration: f32) -> Option<usize> {
        if !self.qualifies(points) {
            return None;
        }
        let candidate = HighScoreEntry {
            points,
            duration,
            date: String::new(),
        };
        let rank = self
            .entries
            .iter()
            .position(|e| candidate.rank_cmp(e) == Ordering::Less);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry if it qualifies
    ///
    /// Returns the rank achieved (1-indexed) or None if it didn't make the list.
    pub fn admit(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.points) {
            return None;
        }

        // Stable sort: an equal entry already on the list keeps its place
        self.entries.push(entry);
        let newest = self.entries.len() - 1;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[a].rank_cmp(&self.entries[b]));
        let rank = order.iter().position(|&i| i == newest);

        let mut ranked: Vec<HighScoreEntry> = order
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect();
        ranked.truncate(self.capacity);
        self.entries = ranked;

        rank.filter(|&r| r < self.capacity).map(|r| r + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
