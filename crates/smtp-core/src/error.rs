// ── Core error types ──
//
// The provisioning taxonomy. The CLI decides messages and exit codes from
// `CoreError::kind()` alone; provider failures keep their `smtp_api::Error`
// as the source together with the step that was being attempted.

use thiserror::Error;

use crate::password::PasswordError;

/// Classification of a [`CoreError`] for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A credential already exists for the requested cluster.
    AlreadyExists,
    /// The requested cluster has no backing sub-user or key.
    NotExist,
    /// Data returned by the provider failed an invariant check.
    Mismatch,
    /// Anything else: transport, provider, configuration.
    Unknown,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Domain errors ────────────────────────────────────────────────
    #[error("{message}")]
    AlreadyExists { message: String },

    #[error("{message}")]
    NotExist { message: String },

    #[error("found user does not have expected username, expected={expected} found={found}")]
    Mismatch { expected: String, found: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("no ip addresses found to assign to sub user")]
    NoIpAddresses,

    #[error("failed to generate password for sub user")]
    Password(#[from] PasswordError),

    #[error("{context}")]
    Provider {
        context: String,
        #[source]
        source: smtp_api::Error,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Wrap a provider failure with the step that was being attempted.
    pub fn provider(context: impl Into<String>, source: smtp_api::Error) -> Self {
        Self::Provider {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotExist { .. } => ErrorKind::NotExist,
            Self::Mismatch { .. } => ErrorKind::Mismatch,
            Self::NoIpAddresses
            | Self::Password(_)
            | Self::Provider { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Unknown,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }

    pub fn is_not_exist(&self) -> bool {
        self.kind() == ErrorKind::NotExist
    }
}
