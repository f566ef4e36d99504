//! Top-level game controller
//!
//! `Game` owns everything that outlives a single session: the screen state,
//! the leaderboard and its store, player settings and the fixed-tick
//! accumulator. The front end calls `update` once per frame with that
//! frame's input and the current time, then draws `snapshot()`.

use std::path::PathBuf;

use crate::audio::{AudioManager, AudioSink};
use crate::config::{ConfigError, GameConfig};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::highscores::{HighScoreEntry, HighScoreStore, HighScores};
use crate::platform::{FrameInput, MenuChoice};
use crate::renderer::Snapshot;
use crate::settings::Settings;
use crate::sim::{DeathCause, Session, TickOutcome, tick};

/// Screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Play,
    Paused,
    GameOver,
    HighScores,
    Settings,
}

/// Things that happened during a frame, for audio and front ends
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A fresh session entered Play
    SessionStarted { seed: u64 },
    /// Food eaten; `points` is the new total
    FoodEaten { points: u32 },
    FatalCollision(DeathCause),
    /// Finished session made the leaderboard at `rank` (1-indexed)
    HighScoreAdmitted { rank: usize },
    MenuEntered,
    Paused,
    Resumed,
    /// Session dropped from Play/Paused without a game over
    SessionAbandoned,
    /// New volume, 0 - 100
    VolumeChanged(u8),
}

enum Transition {
    Stay,
    To(GameState),
    Quit,
}

/// Game instance holding all state
pub struct Game {
    config: GameConfig,
    state: GameState,
    running: bool,
    settings: Settings,
    settings_path: Option<PathBuf>,
    ledger: HighScores,
    store: Box<dyn HighScoreStore>,
    session: Option<Session>,
    audio: AudioManager,
    accumulator: f32,
    last_time: Option<f64>,
    seed: u64,
    sessions_started: u64,
    new_high_score: Option<usize>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Build a game sitting on the main menu
    ///
    /// The leaderboard is loaded from `store` right away. `seed` drives every
    /// session the game will start.
    pub fn new(
        config: GameConfig,
        settings: Settings,
        store: Box<dyn HighScoreStore>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ledger = HighScores::load(store.as_ref(), config.high_score_capacity);
        log::info!(
            "Loaded {} high score(s); tick {} Hz, frame {} Hz",
            ledger.len(),
            config.tick_rate,
            config.frame_rate
        );

        let mut game = Self {
            config,
            state: GameState::MainMenu,
            running: true,
            settings,
            settings_path: None,
            ledger,
            store,
            session: None,
            audio: AudioManager::default(),
            accumulator: 0.0,
            last_time: None,
            seed,
            sessions_started: 0,
            new_high_score: None,
            events: Vec::new(),
        };
        game.reset_audio();
        Ok(game)
    }

    /// Persist settings to `path` whenever the Settings screen is left
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Route audio to `sink` instead of the logging default
    pub fn with_audio(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.audio = AudioManager::new(sink);
        self.reset_audio();
        self
    }

    fn reset_audio(&mut self) {
        self.audio.set_volume(self.settings.volume_gain());
        self.audio.handle(&GameEvent::MenuEntered);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// False once the player has asked to exit
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current session, from Play entry until back on the menu
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Rank earned by the last finished session
    pub fn new_high_score(&self) -> Option<usize> {
        self.new_high_score
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        let session = self.session.as_ref();
        let live_rank = session
            .filter(|s| !s.score.is_finished())
            .and_then(|s| {
                self.ledger
                    .potential_rank(s.score.points(), s.score.duration())
            });
        Snapshot {
            state: self.state,
            arena: self.config.arena(),
            snake: session.map(|s| &s.snake),
            items: session.map(|s| &s.items),
            points: session.map_or(0, |s| s.score.points()),
            duration: session.map_or(0.0, |s| s.score.duration()),
            volume: self.settings.volume,
            high_scores: self.ledger.entries(),
            new_high_score: self.new_high_score,
            live_rank,
        }
    }

    /// Run one frame at wall time `now` (seconds)
    ///
    /// Returns the events the frame produced; audio has already been told.
    pub fn update(&mut self, input: &FrameInput, now: f64) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }

        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now);

        let transition = match self.state {
            GameState::MainMenu => self.update_menu(input),
            GameState::Play => self.update_play(input, dt, now),
            GameState::Paused => self.update_paused(input),
            GameState::GameOver => {
                if input.confirm || input.back {
                    Transition::To(GameState::MainMenu)
                } else if input.close {
                    Transition::Quit
                } else {
                    Transition::Stay
                }
            }
            GameState::HighScores => {
                if input.back || input.confirm {
                    Transition::To(GameState::MainMenu)
                } else if input.close {
                    Transition::Quit
                } else {
                    Transition::Stay
                }
            }
            GameState::Settings => self.update_settings(input),
        };

        match transition {
            Transition::Stay => {}
            Transition::To(next) => self.enter(next, now),
            Transition::Quit => self.quit(),
        }

        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.audio.handle(event);
        }
        events
    }

    fn update_menu(&self, input: &FrameInput) -> Transition {
        if input.close {
            return Transition::Quit;
        }
        match input.menu_choice {
            Some(MenuChoice::Start) => Transition::To(GameState::Play),
            Some(MenuChoice::HighScores) => Transition::To(GameState::HighScores),
            Some(MenuChoice::Settings) => Transition::To(GameState::Settings),
            Some(MenuChoice::Exit) => Transition::Quit,
            None => Transition::Stay,
        }
    }

    fn update_play(&mut self, input: &FrameInput, dt: f32, now: f64) -> Transition {
        if input.close || input.quit_to_menu {
            return Transition::To(GameState::MainMenu);
        }
        if input.pause {
            return Transition::To(GameState::Paused);
        }
        let Some(session) = self.session.as_mut() else {
            log::warn!("Play without a session");
            return Transition::To(GameState::MainMenu);
        };

        if let Some(heading) = input.direction {
            session.snake.steer(heading);
        }

        let tick_dt = self.config.tick_dt();
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= tick_dt;
            substeps += 1;
            match tick(session, now) {
                TickOutcome::Moved => {}
                TickOutcome::Ate => self.events.push(GameEvent::FoodEaten {
                    points: session.score.points(),
                }),
                TickOutcome::Died(cause) => {
                    self.events.push(GameEvent::FatalCollision(cause));
                    return Transition::To(GameState::GameOver);
                }
            }
        }

        session.score.tick(now);
        Transition::Stay
    }

    fn update_paused(&self, input: &FrameInput) -> Transition {
        if input.close || input.quit_to_menu {
            Transition::To(GameState::MainMenu)
        } else if input.pause || input.confirm {
            Transition::To(GameState::Play)
        } else {
            Transition::Stay
        }
    }

    fn update_settings(&mut self, input: &FrameInput) -> Transition {
        if input.volume_delta != 0 && self.settings.adjust_volume(input.volume_delta) {
            self.audio.set_volume(self.settings.volume_gain());
            self.events.push(GameEvent::VolumeChanged(self.settings.volume));
        }
        if input.close {
            Transition::Quit
        } else if input.back || input.confirm {
            Transition::To(GameState::MainMenu)
        } else {
            Transition::Stay
        }
    }

    /// Apply entry side effects for `next`, then switch to it
    fn enter(&mut self, next: GameState, now: f64) {
        let from = self.state;
        log::info!("{from:?} -> {next:?}");

        match next {
            GameState::Play => {
                self.accumulator = 0.0;
                if from == GameState::Paused && self.session.is_some() {
                    if let Some(session) = self.session.as_mut() {
                        session.score.resume(now);
                    }
                    self.events.push(GameEvent::Resumed);
                } else {
                    self.start_session(now);
                }
            }
            GameState::Paused => {
                if let Some(session) = self.session.as_mut() {
                    session.score.pause(now);
                }
                self.events.push(GameEvent::Paused);
            }
            GameState::GameOver => self.finish_session(now),
            GameState::MainMenu => {
                if from == GameState::Settings {
                    self.save_settings();
                }
                if matches!(from, GameState::Play | GameState::Paused) {
                    self.events.push(GameEvent::SessionAbandoned);
                }
                self.session = None;
                self.events.push(GameEvent::MenuEntered);
            }
            GameState::HighScores | GameState::Settings => {}
        }

        self.state = next;
    }

    fn start_session(&mut self, now: f64) {
        let seed = self
            .seed
            .wrapping_add(self.sessions_started.wrapping_mul(2_654_435_761));
        self.sessions_started += 1;
        self.new_high_score = None;
        self.session = Some(Session::new(&self.config, seed, now));
        log::info!("Session {} started (seed {seed})", self.sessions_started);
        self.events.push(GameEvent::SessionStarted { seed });
    }

    /// Stop the clock and try the leaderboard; runs once per session
    fn finish_session(&mut self, now: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.score.is_finished() {
            return;
        }
        let duration = session.score.finish(now);
        let points = session.score.points();

        if !self.ledger.qualifies(points) {
            return;
        }
        if let Some(rank) = self.ledger.admit(HighScoreEntry::today(points, duration)) {
            log::info!("New high score: {points} points in {duration:.1}s, rank {rank}");
            self.new_high_score = Some(rank);
            self.events.push(GameEvent::HighScoreAdmitted { rank });
            self.ledger.save(self.store.as_ref());
        }
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            log::warn!("Failed to save settings to {}: {e}", path.display());
        }
    }

    fn quit(&mut self) {
        if self.state == GameState::Settings {
            self.save_settings();
        }
        log::info!("Exiting from {:?}", self.state);
        self.running = false;
    }
}
