//! Sidebar panel.
//!
//! Only drawn when the layout policy gives it a non-zero width. Names the
//! active session and the server it is read from.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::state::AppState;

pub fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " chatview ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner_width = area.width.saturating_sub(2) as usize;
    let label = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(" session", label)),
        Line::from(format!(
            " {}",
            truncate_with_ellipsis(app.store.session().as_str(), inner_width)
        )),
        Line::default(),
        Line::from(Span::styled(" server", label)),
        Line::from(format!(" {}", truncate_with_ellipsis(&app.server, inner_width))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
