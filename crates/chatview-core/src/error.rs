use std::fmt;

/// Failure of a transcript fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Endpoint unreachable, timed out, or answered with a non-success status.
    Network(String),
    /// Credential rejected or expired.
    Auth(String),
    /// Response body was not a transcript.
    Parse(String),
}

impl FetchError {
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Auth(_))
    }

    /// Short label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network error",
            FetchError::Auth(_) => "auth error",
            FetchError::Parse(_) => "parse error",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(detail) | FetchError::Auth(detail) | FetchError::Parse(detail) => {
                write!(f, "{}: {detail}", self.label())
            }
        }
    }
}

impl std::error::Error for FetchError {}
