use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 25;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 25;

/// Snake length at the start of every life. Score is measured against it.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Head cell of a freshly created snake; the body trails to the left.
pub const DEFAULT_SNAKE_HEAD: (i32, i32) = (8, 12);

/// Movement cadence in milliseconds.
pub const DEFAULT_MOVE_INTERVAL_MS: u64 = 200;

/// Food spawn cadence in milliseconds.
pub const DEFAULT_FOOD_SPAWN_INTERVAL_MS: u64 = 3_000;

/// Poison spawn cadence in milliseconds, when poison is enabled.
pub const DEFAULT_POISON_SPAWN_INTERVAL_MS: u64 = 5_000;

/// Expiry sweep cadence in milliseconds.
pub const DEFAULT_EXPIRY_CHECK_INTERVAL_MS: u64 = 100;

/// Age after which a food or poison item disappears.
pub const DEFAULT_FOOD_LIFETIME_MS: u64 = 10_000;

/// Number of replay frames kept per session.
pub const DEFAULT_HISTORY_CAPACITY: usize = 3_000;

/// Random samples tried before falling back to a free-cell scan.
pub const SPAWN_SAMPLE_ATTEMPTS: usize = 64;

/// Largest wall-clock delta fed into the logical clock in one frame.
pub const MAX_FRAME_DELTA_MS: u64 = 1_000;

/// Longest span of logical time one scheduler advance covers.
pub const MAX_ADVANCE_MS: u64 = 60 * 60 * 1_000;

/// Delay between frames of the terminal loop.
pub const FRAME_SLEEP_MS: u64 = 16;

/// Replay seek step for one key press.
pub const REPLAY_SEEK_STEP_MS: u64 = 1_000;

/// Selectable replay playback speeds.
pub const REPLAY_SPEEDS: &[f32] = &[0.0, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0];

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    /// Fresh food; fades toward `food_fading` as it ages.
    pub food: Color,
    pub food_fading: Color,
    pub poison: Color,
    /// Background color for empty play-area cells.
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Yellow-green snake on dark background.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::LightRed,
    food_fading: Color::Red,
    poison: Color::Magenta,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Every logical cell is drawn two terminal columns wide.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD_FRESH: &str = "()";
pub const GLYPH_FOOD_AGING: &str = "<>";
pub const GLYPH_FOOD_STALE: &str = "..";
pub const GLYPH_POISON: &str = "><";

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SNAKE_HEAD, GridSize, INITIAL_SNAKE_LEN};

    #[test]
    fn default_grid_fits_default_snake() {
        let grid = GridSize::default();

        assert_eq!(grid.total_cells(), 625);
        assert!(DEFAULT_SNAKE_HEAD.0 < i32::from(grid.width));
        assert!(DEFAULT_SNAKE_HEAD.1 < i32::from(grid.height));
        assert!(DEFAULT_SNAKE_HEAD.0 + 1 >= INITIAL_SNAKE_LEN as i32);
    }
}
