//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! frame ticks, push notices and settled fetches. Async producers send into
//! the runtime's inbox; the runtime drains it each loop.

use chatview_core::FetchError;
use chatview_core::Transcript;
use chatview_core::push::PushNotice;
use chatview_core::transcript::RequestToken;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence.
    Tick,
    /// Current terminal size, emitted before other events each loop.
    Frame {
        width: u16,
        height: u16,
        pixel_width: Option<u32>,
    },
    Terminal(CrosstermEvent),
    /// Load the transcript now (startup and the `r` key).
    RefreshRequested,
    Push(PushNotice),
    TranscriptFetched {
        token: RequestToken,
        result: Result<Transcript, FetchError>,
    },
}
