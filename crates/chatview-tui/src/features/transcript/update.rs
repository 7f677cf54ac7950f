//! Transcript reducer helpers.

use chatview_core::Transcript;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use super::render::build_lines;
use super::state::TranscriptState;
use crate::icons::IconLookup;

/// Lines moved per mouse wheel notch.
const MOUSE_SCROLL_LINES: usize = 3;

/// Rebuilds the display rows for `width` and returns to the newest message.
pub fn relayout(
    state: &mut TranscriptState,
    transcript: &Transcript,
    width: usize,
    icons: &dyn IconLookup,
) {
    state.layout_width = width;
    state.set_lines(build_lines(transcript, width, icons));
    state.scroll.snap_to_latest();
}

/// Handles scroll keys. Returns `false` for keys it does not own.
pub fn handle_scroll_key(state: &mut TranscriptState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_down(1),
        KeyCode::PageUp => state.page_up(),
        KeyCode::PageDown => state.page_down(),
        KeyCode::Home | KeyCode::Char('g') => state.scroll.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => state.scroll.snap_to_latest(),
        _ => return false,
    }
    true
}

pub fn handle_mouse(state: &mut TranscriptState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => state.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}
