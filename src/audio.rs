//! Audio routing
//!
//! The game never waits on audio. `AudioManager` turns game events into
//! fire-and-forget commands for an `AudioSink`, tracks which music loop is
//! active and applies the player's volume. Actual playback lives behind the
//! sink.

use crate::game::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Collect,
    /// Session ended
    GameOver,
    /// Session made the leaderboard
    HighScore,
}

impl SoundEffect {
    /// Per-effect gain applied on top of the master volume
    pub fn gain(self) -> f32 {
        match self {
            SoundEffect::Collect => 0.5,
            SoundEffect::GameOver | SoundEffect::HighScore => 1.0,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Game,
}

/// Playback backend
pub trait AudioSink {
    /// Start a one-shot effect at `volume` (0.0 - 1.0)
    fn play_sound(&mut self, effect: SoundEffect, volume: f32);
    /// Switch the background loop, restarting it from the top
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    /// Master volume changed (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Sink that only logs; used when no audio device is available
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {effect:?} @ {volume:.2}");
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::trace!("music {track:?} @ {volume:.2}");
    }

    fn set_volume(&mut self, volume: f32) {
        log::trace!("volume {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    volume: f32,
    current_music: Option<MusicTrack>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            volume: 1.0,
            current_music: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.volume * effect.gain();
        if volume <= 0.0 {
            return;
        }
        self.sink.play_sound(effect, volume);
    }

    /// Switch music unless `track` is already playing
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.current_music == Some(track) {
            return;
        }
        self.current_music = Some(track);
        self.sink.play_music(track, self.volume);
    }

    /// React to one game event
    ///
    /// Volume changes are applied by the owner through `set_volume`.
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted { .. } => self.play_music(MusicTrack::Game),
            GameEvent::FoodEaten { .. } => self.play(SoundEffect::Collect),
            GameEvent::FatalCollision(_) => {
                self.play(SoundEffect::GameOver);
                self.play_music(MusicTrack::Menu);
            }
            GameEvent::HighScoreAdmitted { .. } => self.play(SoundEffect::HighScore),
            GameEvent::MenuEntered => self.play_music(MusicTrack::Menu),
            GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::SessionAbandoned
            | GameEvent::VolumeChanged(_) => {}
        }
    }
}
