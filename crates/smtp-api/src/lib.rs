// smtp-api: Async Rust client for the SendGrid v3 REST API (sub-users, API keys, IPs)

pub mod api_keys;
pub mod client;
pub mod error;
pub mod ips;
pub mod models;
pub mod provider;
pub mod subusers;
pub mod transport;

pub use client::SendGridClient;
pub use error::Error;
pub use models::{ApiKey, IpAddress, SubUser, SubUserQuery};
pub use provider::ProviderApi;
pub use transport::TransportConfig;

/// Standardised name of the SendGrid provider, used in log fields.
pub const PROVIDER_NAME: &str = "sendgrid";

/// Name of the environment variable holding the SendGrid API key.
pub const ENV_API_KEY: &str = "SENDGRID_API_KEY";

/// Default SendGrid API host.
pub const DEFAULT_API_HOST: &str = "https://api.sendgrid.com";

/// Header declaring that a request acts on behalf of a sub-user.
pub const HEADER_ON_BEHALF_OF: &str = "on-behalf-of";

/// Scopes granted to newly created sub-user API keys.
pub const DEFAULT_API_KEY_SCOPES: &[&str] = &["mail.send"];

/// Returns [`DEFAULT_API_KEY_SCOPES`] as owned strings.
pub fn default_api_key_scopes() -> Vec<String> {
    DEFAULT_API_KEY_SCOPES.iter().map(|s| (*s).to_owned()).collect()
}
