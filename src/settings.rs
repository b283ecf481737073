use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{
    DEFAULT_EXPIRY_CHECK_INTERVAL_MS, DEFAULT_FOOD_LIFETIME_MS, DEFAULT_FOOD_SPAWN_INTERVAL_MS,
    DEFAULT_HISTORY_CAPACITY, DEFAULT_MOVE_INTERVAL_MS, GridSize, INITIAL_SNAKE_LEN,
};
use crate::error::SettingsError;

const APP_DIR_NAME: &str = "torus-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// What happens when the snake runs into itself.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Start a fresh snake right away and keep playing.
    #[default]
    ResetInPlace,
    /// Return to idle; the player starts the next game explicitly.
    Finish,
}

/// Tunable rules for one game session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub grid: GridSize,
    pub move_interval_ms: u64,
    pub food_spawn_interval_ms: u64,
    /// Poison is only spawned when this is set.
    pub poison_spawn_interval_ms: Option<u64>,
    pub expiry_check_interval_ms: u64,
    pub food_lifetime_ms: u64,
    pub collision_policy: CollisionPolicy,
    pub clear_food_on_reset: bool,
    /// When false, food may spawn on poison and poison on food.
    pub avoid_cross_type_overlap: bool,
    pub history_capacity: usize,
    /// Fixed RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            move_interval_ms: DEFAULT_MOVE_INTERVAL_MS,
            food_spawn_interval_ms: DEFAULT_FOOD_SPAWN_INTERVAL_MS,
            poison_spawn_interval_ms: None,
            expiry_check_interval_ms: DEFAULT_EXPIRY_CHECK_INTERVAL_MS,
            food_lifetime_ms: DEFAULT_FOOD_LIFETIME_MS,
            collision_policy: CollisionPolicy::default(),
            clear_food_on_reset: true,
            avoid_cross_type_overlap: true,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Checks that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if usize::from(self.grid.width) < INITIAL_SNAKE_LEN || self.grid.height == 0 {
            return Err(SettingsError::Invalid(format!(
                "grid {}x{} cannot hold a {}-cell snake",
                self.grid.width, self.grid.height, INITIAL_SNAKE_LEN
            )));
        }

        let intervals = [
            ("move_interval_ms", Some(self.move_interval_ms)),
            ("food_spawn_interval_ms", Some(self.food_spawn_interval_ms)),
            ("poison_spawn_interval_ms", self.poison_spawn_interval_ms),
            ("expiry_check_interval_ms", Some(self.expiry_check_interval_ms)),
            ("food_lifetime_ms", Some(self.food_lifetime_ms)),
        ];
        for (name, value) in intervals {
            if value == Some(0) {
                return Err(SettingsError::Invalid(format!("{name} must be positive")));
            }
        }

        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Returns the platform-correct directory for the log file.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Loads and validates settings from `path`, or from [`settings_path`].
///
/// A missing file yields the defaults. A file that exists but cannot be
/// read, parsed, or validated is an error.
pub fn load_settings(path: Option<&Path>) -> Result<GameSettings, SettingsError> {
    let path = path.map_or_else(settings_path, Path::to_path_buf);
    let settings = load_settings_from_path(&path)?;
    settings.validate()?;
    Ok(settings)
}

fn load_settings_from_path(path: &Path) -> Result<GameSettings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(GameSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings = serde_json::from_str::<GameSettings>(&raw).map_err(|source| {
        SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Writes `settings` as pretty JSON, creating parent directories when needed.
pub fn save_settings(path: &Path, settings: &GameSettings) -> Result<(), SettingsError> {
    let io_error = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}
