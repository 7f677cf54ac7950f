//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself.

use chatview_core::transcript::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Quit,
    /// Fetch the transcript; the result comes back tagged with `token`.
    FetchTranscript { token: RequestToken },
}
