use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use torus_snake::clock::FrameClock;
use torus_snake::config::{
    DEFAULT_POISON_SPAWN_INTERVAL_MS, FRAME_SLEEP_MS, GridSize, MAX_FRAME_DELTA_MS, THEME_CLASSIC,
};
use torus_snake::error::AppError;
use torus_snake::game::GameState;
use torus_snake::input::{GameInput, InputHandler};
use torus_snake::logging::init_file_logging;
use torus_snake::renderer;
use torus_snake::settings::{
    CollisionPolicy, GameSettings, data_dir, load_settings, save_settings, settings_path,
};
use torus_snake::terminal_runtime::TerminalSession;
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log file. Defaults to the platform data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Seed for item placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Spawn poison every 5 seconds, unless the settings file sets a cadence.
    #[arg(long)]
    poison: bool,

    /// End the game on collision instead of starting over in place.
    #[arg(long = "finish-on-collision")]
    finish_on_collision: bool,

    /// Write the effective settings to the settings file and exit.
    #[arg(long = "save-settings")]
    save_settings: bool,
}

impl Cli {
    fn apply_overrides(&self, mut settings: GameSettings) -> GameSettings {
        if self.width.is_some() || self.height.is_some() {
            settings.grid = GridSize {
                width: self.width.unwrap_or(settings.grid.width),
                height: self.height.unwrap_or(settings.grid.height),
            };
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.poison && settings.poison_spawn_interval_ms.is_none() {
            settings.poison_spawn_interval_ms = Some(DEFAULT_POISON_SPAWN_INTERVAL_MS);
        }
        if self.finish_on_collision {
            settings.collision_policy = CollisionPolicy::Finish;
        }
        settings
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir().join("torus-snake.log"));
    init_file_logging(&log_path)?;

    let settings = cli.apply_overrides(load_settings(cli.settings.as_deref())?);
    settings.validate()?;

    if cli.save_settings {
        let path = cli.settings.clone().unwrap_or_else(settings_path);
        save_settings(&path, &settings)?;
        info!(path = %path.display(), "saved settings");
        return Ok(());
    }

    run(GameState::new(settings))
}

fn run(mut state: GameState) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut clock = FrameClock::new(Duration::from_millis(MAX_FRAME_DELTA_MS));

    loop {
        session.draw(|frame| renderer::render(frame, &state, &THEME_CLASSIC))?;

        for game_input in input.poll_inputs()? {
            if game_input == GameInput::Quit {
                info!(score = state.score(), "quit");
                return Ok(());
            }
            state.apply_input(game_input);
        }

        state.advance(clock.tick());

        thread::sleep(Duration::from_millis(FRAME_SLEEP_MS));
    }
}
