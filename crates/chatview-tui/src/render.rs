//! Pure view functions.
//!
//! Reads `&AppState` and draws to a ratatui `Frame`; never mutates state.
//! Screen split comes from `app.layout`, which the reducer recomputes on
//! every frame event.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::common::Scrollbar;
use crate::footer::{footer_height, render_footer};
use crate::sidebar::render_sidebar;
use crate::state::AppState;
use crate::transcript::convert_line;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.layout.sidebar_cols),
            Constraint::Length(app.layout.main_cols),
            Constraint::Min(0),
        ])
        .split(area);

    if app.layout.sidebar_cols > 0 {
        render_sidebar(app, frame, columns[0]);
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(footer_height(app))])
        .split(columns[1]);

    render_transcript(app, frame, rows[0]);
    render_footer(app, frame, rows[1]);
}

fn render_transcript(app: &AppState, frame: &mut Frame, area: Rect) {
    if app.transcript.lines().is_empty() {
        render_placeholder(app, frame, area);
        return;
    }

    let width = app.layout.message_cols.min(area.width);
    let message_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    };

    let state = &app.transcript;
    let lines: Vec<Line<'static>> = state.lines()[state.visible_range()]
        .iter()
        .map(|line| convert_line(line, width as usize))
        .collect();
    frame.render_widget(Paragraph::new(lines), message_area);

    frame.render_widget(
        Scrollbar::new(state.lines().len(), state.viewport_height, state.offset()),
        area,
    );
}

fn render_placeholder(app: &AppState, frame: &mut Frame, area: Rect) {
    let text = if app.store.is_loaded() {
        "No messages yet"
    } else if app.store.last_error().is_some() {
        "Transcript unavailable"
    } else {
        "Loading transcript…"
    };

    let top = area.height.saturating_sub(1) / 2;
    let centered = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top).min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        centered,
    );
}
