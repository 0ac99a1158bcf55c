// smtp-core: Per-cluster SMTP credential provisioning on top of smtp-api.

pub mod config;
pub mod details;
pub mod error;
pub mod password;
pub mod provisioner;
pub mod secret;

#[cfg(test)]
mod fake;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ProviderConfig;
pub use details::SmtpDetails;
pub use error::{CoreError, ErrorKind};
pub use password::{PasswordError, PasswordGenerator, PasswordPolicy, RandomPasswordGenerator};
pub use provisioner::{SendGridProvisioner, SmtpProvisioner};
pub use secret::{DEFAULT_SECRET_NAME, SecretDocument, render_secret};
