//! Transcript feature slice.
//!
//! - `state.rs`: laid-out rows and the scroll controller
//! - `render.rs`: snapshot to rows, rows to ratatui lines
//! - `update.rs`: relayout and scroll input
//! - `style.rs`: UI-agnostic styled rows

mod render;
mod state;
mod style;
mod update;

pub use render::{build_lines, convert_line};
pub use state::{ScrollController, ScrollMode, TranscriptState};
pub use style::{Style, StyledLine, StyledSpan};
pub use update::{handle_mouse, handle_scroll_key, relayout};
