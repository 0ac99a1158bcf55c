use thiserror::Error;

/// Top-level error type for the `smtp-api` crate.
///
/// Every provider call fails with one of these. `smtp-core` wraps them with
/// the operation that was being attempted and classifies them for the CLI.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key cannot be sent as a header value.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response, with the raw body for debugging.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response other than the one the endpoint documents.
    #[error("non-{expected} status code returned, code={status} body={body}")]
    UnexpectedStatus {
        expected: u16,
        status: u16,
        body: String,
    },

    /// A username lookup did not resolve to exactly one sub-user.
    #[error("should be exactly one sub user with username {username}, found {found}")]
    SubUserNotFound { username: String, found: usize },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Rejected locally before a request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl Error {
    /// Returns `true` if a username lookup resolved to no unique sub-user.
    ///
    /// HTTP failures, 404 included, are never a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SubUserNotFound { .. })
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
