//! Transcript snapshot with request ordering.
//!
//! Every refresh is tagged with a monotonically increasing `RequestToken`.
//! Only the most recently issued token may replace the snapshot; responses
//! for older tokens are discarded whether they succeeded or failed. This keeps
//! overlapping fetches from regressing the view to an older server state.
//!
//! A successful apply replaces the snapshot wholesale (no merge, no dedup).

use tracing::debug;

use crate::error::FetchError;
use crate::message::{SessionId, Transcript};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Result of applying a settled fetch to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Snapshot replaced.
    Applied,
    /// A newer request was issued after this one; result dropped.
    Stale,
    /// The latest request failed; snapshot kept, error recorded.
    Failed(FetchError),
}

/// Holds the visible transcript of one session.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    session: SessionId,
    snapshot: Transcript,
    next_token: u64,
    latest_issued: Option<RequestToken>,
    last_error: Option<FetchError>,
    loaded: bool,
}

impl TranscriptStore {
    /// Creates an empty store for a session.
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            snapshot: Transcript::default(),
            next_token: 1,
            latest_issued: None,
            last_error: None,
            loaded: false,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn snapshot(&self) -> &Transcript {
        &self.snapshot
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// True once any fetch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True while the most recently issued request has not settled.
    pub fn is_refreshing(&self) -> bool {
        self.latest_issued.is_some()
    }

    /// Issues the token for a new fetch. Earlier tokens become stale.
    pub fn begin_refresh(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.latest_issued = Some(token);
        debug!(session = %self.session, token = token.0, "refresh issued");
        token
    }

    /// Applies a settled fetch.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Transcript, FetchError>,
    ) -> ApplyOutcome {
        if self.latest_issued != Some(token) {
            debug!(session = %self.session, token = token.0, "discarding stale response");
            return ApplyOutcome::Stale;
        }
        self.latest_issued = None;

        match result {
            Ok(transcript) => {
                self.snapshot = transcript;
                self.last_error = None;
                self.loaded = true;
                ApplyOutcome::Applied
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                ApplyOutcome::Failed(err)
            }
        }
    }
}
