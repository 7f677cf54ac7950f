//! Effect handlers.
//!
//! Each handler is an async function that performs the I/O for one effect
//! and returns the event the reducer should see.

use std::sync::Arc;

use chatview_core::SessionId;
use chatview_core::api::ChatApi;
use chatview_core::auth::TokenSource;
use chatview_core::sync::fetch_once;
use chatview_core::transcript::RequestToken;
use tracing::debug;

use crate::events::UiEvent;

pub async fn fetch_transcript(
    api: ChatApi,
    session: SessionId,
    tokens: Arc<dyn TokenSource>,
    token: RequestToken,
) -> UiEvent {
    let result = fetch_once(&api, &session, tokens.as_ref()).await;
    debug!(
        %session,
        token = token.value(),
        ok = result.is_ok(),
        "transcript fetch settled"
    );
    UiEvent::TranscriptFetched { token, result }
}
