use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_FOOD_AGING, GLYPH_FOOD_FRESH, GLYPH_FOOD_STALE,
    GLYPH_POISON, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GridSize, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::grid::Position;
use crate::snapshot::{CellType, Snapshot};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    render_finished_menu, render_pause_menu, render_replay_banner, render_start_menu,
};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let live = state.snapshot();
    let view = match state.status {
        GameStatus::Replaying => state.replay_frame().unwrap_or(&live),
        _ => &live,
    };

    let hud_info = HudInfo {
        deaths: state.deaths,
        food_eaten: state.food_eaten,
        poison_eaten: state.poison_eaten,
        replay: state
            .replay_cursor()
            .map(|cursor| (cursor.progress(), cursor.speed())),
        theme,
    };

    let area = frame.area();
    let hud_area = render_hud(frame, area, view, state.status, &hud_info);
    let play_area = board_rect(hud_area, view.bounds);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, view, theme);

    match state.status {
        GameStatus::Idle if state.is_start_screen() => render_start_menu(frame, play_area, theme),
        GameStatus::Idle => render_finished_menu(
            frame,
            play_area,
            state.last_score.unwrap_or(0),
            !state.history().is_empty(),
            theme,
        ),
        GameStatus::Paused => render_pause_menu(frame, play_area, theme),
        GameStatus::Replaying => render_replay_banner(frame, play_area, theme),
        GameStatus::Playing => {}
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, view: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    let empty_style = Style::new().bg(theme.play_bg);

    for y in 0..i32::from(view.bounds.height) {
        for x in 0..i32::from(view.bounds.width) {
            let position = Position { x, y };
            let Some((column, row)) = logical_to_terminal(inner, view.bounds, position) else {
                continue;
            };

            let (glyph, style) = match view.classify(position) {
                CellType::Empty => ("  ", empty_style),
                CellType::SnakeHead => (
                    GLYPH_SNAKE_HEAD,
                    empty_style
                        .fg(theme.snake_head)
                        .add_modifier(Modifier::BOLD),
                ),
                CellType::SnakeBody => (GLYPH_SNAKE_BODY, empty_style.fg(theme.snake_body)),
                CellType::Food { remaining } => food_glyph(remaining, empty_style, theme),
                CellType::Poison => (GLYPH_POISON, empty_style.fg(theme.poison)),
            };

            buffer.set_string(column, row, glyph, style);
        }
    }
}

/// Food shrinks and darkens as its lifetime runs out.
fn food_glyph(remaining: f32, base: Style, theme: &Theme) -> (&'static str, Style) {
    if remaining > 2.0 / 3.0 {
        (GLYPH_FOOD_FRESH, base.fg(theme.food).add_modifier(Modifier::BOLD))
    } else if remaining > 1.0 / 3.0 {
        (GLYPH_FOOD_AGING, base.fg(theme.food))
    } else {
        (GLYPH_FOOD_STALE, base.fg(theme.food_fading))
    }
}

/// Centres the bordered board inside `area`, shrinking it if the terminal is
/// too small.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = (bounds.width.saturating_mul(CELL_COLUMNS))
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
