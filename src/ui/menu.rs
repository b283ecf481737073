use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

/// Start screen: title row, key help in a bordered box, steering hint below.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, hint_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("TORUS SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    bordered_lines(
        frame,
        body_row,
        " start ",
        vec![
            Line::from("The edges wrap around."),
            Line::from("Food fades after ten seconds."),
            Line::from(""),
            Line::from("[Enter]/[Space] Start"),
            Line::from("[Q] Quit"),
        ],
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to steer, [P] to pause"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        hint_row,
    );
}

pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    bordered_lines(
        frame,
        popup,
        " pause ",
        vec![
            Line::from("PAUSED").style(Style::default().fg(theme.menu_title)),
            Line::from(""),
            Line::from("[P]/[Enter] Resume"),
            Line::from("[X] Reset  [Q] Quit"),
        ],
    );
}

/// Shown once a game ends under the finish-on-collision policy.
pub fn render_finished_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    can_replay: bool,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER").style(Style::default().fg(theme.menu_title)),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] New game"),
    ];
    if can_replay {
        lines.push(Line::from("[R] Replay"));
    }
    lines.push(Line::from("[Q] Quit"));

    bordered_lines(frame, popup, " game over ", lines);
}

/// Replay key help along the top edge of the board.
pub fn render_replay_banner(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let banner = Rect {
        height: area.height.min(1),
        ..area
    };

    frame.render_widget(
        Paragraph::new(Line::from(
            " [,]/[.] seek  [[]/[]] speed  [R] exit  [Enter] new ",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.menu_footer)),
        banner,
    );
}

fn bordered_lines(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        area,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
