//! Player preferences
//!
//! Persisted separately from high scores as a small JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest volume step shown to the player
pub const MAX_VOLUME: u8 = 100;

/// Settings persistence errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume, 0 - 100
    pub volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self { volume: MAX_VOLUME }
    }
}

impl Settings {
    /// Volume as an audio gain (0.0 - 1.0)
    pub fn volume_gain(&self) -> f32 {
        f32::from(self.volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
    }

    /// Nudge the volume by `delta` steps, clamped to 0 - 100
    ///
    /// Returns true if the value changed.
    pub fn adjust_volume(&mut self, delta: i32) -> bool {
        let before = self.volume;
        let next = (i32::from(self.volume) + delta).clamp(0, i32::from(MAX_VOLUME));
        self.volume = next as u8;
        self.volume != before
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.volume = settings.volume.min(MAX_VOLUME);
        Ok(settings)
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
