//! Authorization token sources.
//!
//! Token retrieval is owned by whoever embeds chatview. The client only asks
//! a `TokenSource` for the header value and sends it verbatim as
//! `Authorization: <token>`.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::config::AuthConfig;

/// Opaque `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Supplies the current authorization token.
pub trait TokenSource: Send + Sync {
    /// Returns the token to attach to the next request.
    ///
    /// # Errors
    /// Returns an error if no token is available.
    fn token(&self) -> Result<AuthToken>;
}

/// A fixed token (from a CLI flag or a test).
#[derive(Debug, Clone)]
pub struct StaticToken(AuthToken);

impl StaticToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(AuthToken::new(value))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Result<AuthToken> {
        Ok(self.0.clone())
    }
}

/// Token read from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenSource for EnvToken {
    fn token(&self) -> Result<AuthToken> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(AuthToken::new(value.trim())),
            _ => bail!("Environment variable {} is not set", self.var),
        }
    }
}

/// Token read from a file on every request (trimmed).
#[derive(Debug, Clone)]
pub struct FileToken {
    path: PathBuf,
}

impl FileToken {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenSource for FileToken {
    fn token(&self) -> Result<AuthToken> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file {}", self.path.display()))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("Token file {} is empty", self.path.display());
        }
        Ok(AuthToken::new(trimmed))
    }
}

/// Tries each source in order, returning the first token found.
pub struct ChainedToken {
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenSource for ChainedToken {
    fn token(&self) -> Result<AuthToken> {
        let mut reasons = Vec::new();
        for source in &self.sources {
            match source.token() {
                Ok(token) => return Ok(token),
                Err(e) => reasons.push(format!("{e:#}")),
            }
        }
        bail!("No authorization token available ({})", reasons.join("; "))
    }
}

/// Builds the token source: explicit override, then env var, then file.
pub fn resolve_token_source(
    override_token: Option<&str>,
    config: &AuthConfig,
) -> Box<dyn TokenSource> {
    if let Some(token) = override_token {
        return Box::new(StaticToken::new(token));
    }

    let mut sources: Vec<Box<dyn TokenSource>> = vec![Box::new(EnvToken::new(&config.token_env))];
    if let Some(path) = &config.token_file {
        sources.push(Box::new(FileToken::new(path)));
    }
    Box::new(ChainedToken { sources })
}
