//! Headless transcript synchronization.
//!
//! `TranscriptSync` drives a [`TranscriptStore`] without a UI: each refresh
//! request spawns a fetch onto a `JoinSet`, and settled fetches are applied in
//! completion order. The store's token check drops whichever of several
//! overlapping fetches is not the latest.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::warn;

use crate::api::ChatApi;
use crate::auth::TokenSource;
use crate::error::FetchError;
use crate::message::{SessionId, Transcript};
use crate::transcript::{ApplyOutcome, RequestToken, TranscriptStore};

/// Resolves the token and fetches one transcript.
///
/// A missing token is reported as an auth failure.
pub async fn fetch_once(
    api: &ChatApi,
    session: &SessionId,
    tokens: &dyn TokenSource,
) -> Result<Transcript, FetchError> {
    let token = tokens
        .token()
        .map_err(|e| FetchError::Auth(format!("{e:#}")))?;
    api.fetch_transcript(session, &token).await
}

type Settled = (RequestToken, Result<Transcript, FetchError>);

pub struct TranscriptSync {
    store: TranscriptStore,
    api: ChatApi,
    tokens: Arc<dyn TokenSource>,
    in_flight: JoinSet<Settled>,
}

impl TranscriptSync {
    pub fn new(session: SessionId, api: ChatApi, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            store: TranscriptStore::new(session),
            api,
            tokens,
            in_flight: JoinSet::new(),
        }
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Number of fetches that have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Issues a token and starts fetching in the background.
    pub fn request_refresh(&mut self) -> RequestToken {
        let token = self.store.begin_refresh();
        let api = self.api.clone();
        let tokens = Arc::clone(&self.tokens);
        let session = self.store.session().clone();
        self.in_flight.spawn(async move {
            let result = fetch_once(&api, &session, tokens.as_ref()).await;
            (token, result)
        });
        token
    }

    /// Waits for the next fetch to settle and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_update(&mut self) -> Option<ApplyOutcome> {
        loop {
            match self.in_flight.join_next().await? {
                Ok((token, result)) => return Some(self.store.apply(token, result)),
                Err(e) => warn!("fetch task failed: {e}"),
            }
        }
    }
}
