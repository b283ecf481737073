use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::food::FoodKind;
use crate::game::GameStatus;
use crate::snapshot::Snapshot;

/// Session counters and replay progress shown next to the snapshot values.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub deaths: u32,
    pub food_eaten: u32,
    pub poison_eaten: u32,
    /// Progress fraction and speed while replaying.
    pub replay: Option<(f64, f32)>,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &Snapshot,
    status: GameStatus,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(view, info)).alignment(Alignment::Center),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(status_line(view, status, info)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn score_line<'a>(view: &Snapshot, info: &HudInfo<'_>) -> Line<'a> {
    let label = Style::default().fg(info.theme.hud_muted);
    let value = Style::default()
        .fg(info.theme.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(view.score().to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(view.snake.len().to_string(), value),
        Span::styled("  Eaten ", label),
        Span::styled(info.food_eaten.to_string(), value),
        Span::styled("  Poisoned ", label),
        Span::styled(info.poison_eaten.to_string(), value),
        Span::styled("  Deaths ", label),
        Span::styled(info.deaths.to_string(), value),
    ])
}

fn status_line<'a>(view: &Snapshot, status: GameStatus, info: &HudInfo<'_>) -> Line<'a> {
    let muted = Style::default().fg(info.theme.hud_muted);
    let food = view
        .food
        .iter()
        .filter(|item| item.kind == FoodKind::Food)
        .count();
    let poison = view.food.len() - food;

    let mut text = format!(
        "{}  t={:.1}s  food {food}  poison {poison}  {}x{}",
        status_label(status),
        view.now.as_millis() as f64 / 1_000.0,
        view.bounds.width,
        view.bounds.height,
    );
    if let Some((progress, speed)) = info.replay {
        text.push_str(&format!("  replay {:>3.0}% @ {speed}x", progress * 100.0));
    }

    Line::from(Span::styled(text, muted))
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "IDLE",
        GameStatus::Playing => "PLAYING",
        GameStatus::Paused => "PAUSED",
        GameStatus::Replaying => "REPLAY",
    }
}
