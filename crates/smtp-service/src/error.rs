//! CLI error types with miette diagnostics.
//!
//! Provisioning failures are classified by `ErrorKind`: already-exists and
//! not-exist are known outcomes with their own exit code, everything else
//! is reported as unknown.

use miette::Diagnostic;
use thiserror::Error;

use smtp_core::{CoreError, ErrorKind};

pub mod exit_code {
    /// The cluster is in a state the command cannot act on.
    pub const KNOWN: i32 = 1;
    pub const UNKNOWN: i32 = 2;
}

/// The provisioning operation a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Delete,
    Refresh,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Known outcomes ───────────────────────────────────────────────
    #[error("api key for cluster {cluster_id} already exists")]
    #[diagnostic(
        code(smtp::already_exists),
        help("Rotate the existing key with: smtp-service refresh {cluster_id}")
    )]
    AlreadyExists {
        cluster_id: String,
        #[source]
        source: CoreError,
    },

    #[error("{message}")]
    #[diagnostic(code(smtp::not_exist))]
    NotExist {
        message: String,
        #[source]
        source: CoreError,
    },

    // ── Provisioning ─────────────────────────────────────────────────
    #[error("unknown error: failed to {action} smtp details for cluster {cluster_id}")]
    #[diagnostic(code(smtp::provisioning))]
    Provisioning {
        action: &'static str,
        cluster_id: String,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    #[diagnostic(code(smtp::core))]
    Core(#[from] CoreError),

    // ── Configuration ────────────────────────────────────────────────
    #[error("No SendGrid API key configured")]
    #[diagnostic(
        code(smtp::no_api_key),
        help("Set SENDGRID_API_KEY, pass --api-key, or add api_key to {path}")
    )]
    NoApiKey { path: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(smtp::no_config))]
    ConfigNotFound { path: String },

    #[error(transparent)]
    #[diagnostic(code(smtp::config))]
    Config(Box<figment::Error>),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(smtp::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("error converting details to secret: {0}")]
    #[diagnostic(code(smtp::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Attach the user-facing message for a failed provisioning operation.
    pub fn provisioning(operation: Operation, cluster_id: &str, err: CoreError) -> Self {
        let cluster_id = cluster_id.to_owned();
        match (operation, err.kind()) {
            (Operation::Create, ErrorKind::AlreadyExists) => Self::AlreadyExists {
                cluster_id,
                source: err,
            },
            (Operation::Get, ErrorKind::NotExist) => Self::NotExist {
                message: format!("api key for cluster {cluster_id} not found"),
                source: err,
            },
            (Operation::Delete, ErrorKind::NotExist) => Self::NotExist {
                message: format!("api key for cluster {cluster_id} does not exist"),
                source: err,
            },
            (Operation::Refresh, ErrorKind::NotExist) => Self::NotExist {
                message: format!(
                    "cannot create api key for cluster that does not exist, cluster={cluster_id}, use the create command"
                ),
                source: err,
            },
            _ => Self::Provisioning {
                action: operation.verb(),
                cluster_id,
                source: err,
            },
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AlreadyExists { .. } | Self::NotExist { .. } => exit_code::KNOWN,
            Self::Core(err) => match err.kind() {
                ErrorKind::AlreadyExists | ErrorKind::NotExist => exit_code::KNOWN,
                ErrorKind::Mismatch | ErrorKind::Unknown => exit_code::UNKNOWN,
            },
            _ => exit_code::UNKNOWN,
        }
    }
}
