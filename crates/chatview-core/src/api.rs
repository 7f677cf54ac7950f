//! HTTP client for the chat server.
//!
//! Only one endpoint is used:
//! `GET {server}/api/chat/getMessagesByChatID/{session}` with the raw
//! `Authorization` header. The body is a JSON array of `{author, content}`.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use tracing::debug;
use url::Url;

use crate::auth::AuthToken;
use crate::error::FetchError;
use crate::message::{SessionId, Transcript};

const MESSAGES_PATH: [&str; 3] = ["api", "chat", "getMessagesByChatID"];

/// Chat server client.
#[derive(Debug, Clone)]
pub struct ChatApi {
    base_url: Url,
    http: reqwest::Client,
}

impl ChatApi {
    /// Creates a client for `server_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(server_url).with_context(|| format!("Invalid server URL: {server_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Server URL cannot be used as a base: {server_url}");
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the message list for a session (session id is percent-encoded).
    ///
    /// # Errors
    /// Returns an error if the base URL cannot carry path segments.
    pub fn messages_url(&self, session: &SessionId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Server URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(MESSAGES_PATH)
            .push(session.as_str());
        Ok(url)
    }

    /// Fetches the full transcript of a session.
    ///
    /// # Errors
    /// - `FetchError::Auth` on 401/403
    /// - `FetchError::Network` on connection failure, timeout or other status
    /// - `FetchError::Parse` when the body is not a message array
    pub async fn fetch_transcript(
        &self,
        session: &SessionId,
        token: &AuthToken,
    ) -> Result<Transcript, FetchError> {
        let url = self
            .messages_url(session)
            .map_err(|e| FetchError::Network(format!("{e:#}")))?;
        debug!(%url, "fetching transcript");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Network(describe_request_error(&e)))?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(FetchError::Auth(format!("server returned {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("server returned {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(describe_request_error(&e)))?;
        let transcript: Transcript = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Parse(format!("invalid message list: {e}")))?;
        debug!(session = %session, messages = transcript.len(), "transcript fetched");
        Ok(transcript)
    }
}

fn describe_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("cannot connect to server ({err})")
    } else if err.is_builder() {
        format!("invalid request ({err})")
    } else {
        err.to_string()
    }
}
