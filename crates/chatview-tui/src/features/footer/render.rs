use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ConnectionState;
use crate::common::text::truncate_with_ellipsis;
use crate::state::AppState;

const STATUS_HEIGHT: u16 = 1;
const BANNER_HEIGHT: u16 = 1;

/// Spinner frames shown while a fetch is in flight.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Rows the footer needs for the current state.
pub fn footer_height(app: &AppState) -> u16 {
    if app.store.last_error().is_some() {
        STATUS_HEIGHT + BANNER_HEIGHT
    } else {
        STATUS_HEIGHT
    }
}

pub fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let mut lines = vec![status_line(app, width)];

    if let Some(error) = app.store.last_error() {
        let text = truncate_with_ellipsis(&format!(" ✕ {error}"), width);
        lines.push(Line::from(Span::styled(
            format!("{text:<width$}"),
            Style::default().fg(Color::White).bg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn status_line(app: &AppState, width: usize) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let sep = Span::styled(" │ ", dim);

    let (glyph, color) = match app.connection {
        ConnectionState::Connecting => ("○", Color::Yellow),
        ConnectionState::Live => ("●", Color::Green),
        ConnectionState::Reconnecting { .. } => ("○", Color::Red),
    };

    let count = app.store.snapshot().len();
    let noun = if count == 1 { "message" } else { "messages" };

    let mut spans = vec![
        Span::styled(
            format!(" {}", truncate_with_ellipsis(app.store.session().as_str(), width / 3)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(format!("{glyph} {}", app.connection.label()), Style::default().fg(color)),
        sep.clone(),
        Span::raw(format!("{count} {noun}")),
    ];

    if app.store.is_refreshing() {
        let frame = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(sep.clone());
        spans.push(Span::styled(format!("{frame} refreshing"), Style::default().fg(Color::Cyan)));
    }

    if !app.transcript.scroll.is_following() {
        spans.push(sep);
        spans.push(Span::styled("End ↓ latest", dim));
    }

    Line::from(spans)
}
