//! Grid Snake entry point
//!
//! Runs the game headless in attract mode: the autopilot steers, each game
//! over screen is printed, and the next session starts right away. High
//! scores and settings are read from and written to disk like a normal run.
//!
//! # Usage
//! ```bash
//! grid-snake --frames 3600 --seed 7
//! grid-snake --realtime --print-every 15
//! RUST_LOG=debug grid-snake --config snake.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;

use grid_snake::platform::{Clock, FrameInput, MenuChoice, SteppedClock, SystemClock};
use grid_snake::renderer::{render, render_high_scores};
use grid_snake::sim::choose_heading;
use grid_snake::{FileStore, Game, GameConfig, GameEvent, GameState, Settings};

/// Grid Snake - wrap-around arcade snake, played by the autopilot
#[derive(Parser, Debug)]
#[command(name = "grid-snake")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for session RNGs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,

    /// High score file
    #[arg(long, default_value = "highscores.csv")]
    scores: PathBuf,

    /// Settings file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// JSON game configuration (defaults if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable hazards
    #[arg(long)]
    no_hazards: bool,

    /// Sleep between frames instead of stepping time instantly
    #[arg(long)]
    realtime: bool,

    /// Print the board every N frames while playing (0 = only game overs)
    #[arg(long, default_value_t = 0)]
    print_every: u32,
}

/// Decide this frame's input the way a player in attract mode would
fn autopilot_input(game: &Game) -> FrameInput {
    match game.state() {
        GameState::MainMenu => FrameInput::menu(MenuChoice::Start),
        GameState::Play => game
            .session()
            .and_then(choose_heading)
            .map(FrameInput::steer)
            .unwrap_or_default(),
        GameState::GameOver => {
            print!("{}", render(&game.snapshot()));
            FrameInput::confirm()
        }
        GameState::Paused => FrameInput::pause(),
        GameState::HighScores | GameState::Settings => FrameInput::back(),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Grid Snake v{}", env!("CARGO_PKG_VERSION"));

    let loaded = match args.config.as_deref() {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if args.no_hazards {
        config.hazards_enabled = false;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let settings = Settings::load(&args.settings);
    let store = Box::new(FileStore::new(&args.scores));

    let mut game = match Game::new(config, settings, store, seed) {
        Ok(game) => game.with_settings_path(&args.settings),
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Running {} frames with seed {seed}", args.frames);

    let frame_dt = f64::from(game.config().frame_dt());
    let wall = SystemClock::new();
    let mut stepped = SteppedClock::new(frame_dt);
    let mut now = 0.0;
    let mut games = 0u32;

    for frame in 0..args.frames {
        if !game.is_running() {
            break;
        }
        now = if args.realtime {
            thread::sleep(Duration::from_secs_f64(frame_dt));
            wall.now()
        } else {
            stepped.advance()
        };

        let input = autopilot_input(&game);
        for event in game.update(&input, now) {
            match event {
                GameEvent::FatalCollision(cause) => {
                    games += 1;
                    log::info!("Game {games} over: {cause:?}");
                }
                GameEvent::HighScoreAdmitted { rank } => println!("New high score, rank #{rank}"),
                other => log::debug!("{other:?}"),
            }
        }

        if args.print_every > 0
            && frame % args.print_every == 0
            && game.state() == GameState::Play
        {
            print!("{}", render(&game.snapshot()));
        }
    }

    // Abandon any running session, then leave from the menu
    while game.is_running() {
        game.update(&FrameInput::close(), now);
    }

    println!("\nHIGH SCORES");
    print!("{}", render_high_scores(game.high_scores().entries()));
    ExitCode::SUCCESS
}
