//! Application state.
//!
//! ```text
//! AppState
//! ├── store: TranscriptStore       (snapshot, request tokens, last error)
//! ├── transcript: TranscriptState  (laid-out rows, scroll)
//! ├── connection: ConnectionState  (push channel)
//! └── layout: ScreenLayout         (columns/rows for the current frame)
//! ```
//!
//! Only the reducer mutates this; the renderer reads it.

use chatview_core::SessionId;
use chatview_core::transcript::TranscriptStore;

use crate::footer::ConnectionState;
use crate::icons::{DefaultIcons, IconLookup};
use crate::layout::ScreenLayout;
use crate::transcript::TranscriptState;

pub struct AppState {
    pub store: TranscriptStore,
    pub transcript: TranscriptState,
    pub connection: ConnectionState,
    pub layout: ScreenLayout,
    /// Server URL shown in the sidebar.
    pub server: String,
    /// Fallback pixel width of one column.
    pub cell_width_px: u32,
    /// Terminal size (columns, rows) from the last frame.
    pub terminal_size: (u16, u16),
    /// Pixel width reported by the terminal, if any.
    pub pixel_width: Option<u32>,
    pub icons: Box<dyn IconLookup>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: SessionId, server: impl Into<String>, cell_width_px: u32) -> Self {
        Self {
            store: TranscriptStore::new(session),
            transcript: TranscriptState::default(),
            connection: ConnectionState::default(),
            layout: ScreenLayout::default(),
            server: server.into(),
            cell_width_px,
            terminal_size: (0, 0),
            pixel_width: None,
            icons: Box::new(DefaultIcons),
            spinner_frame: 0,
            should_quit: false,
        }
    }
}
