// ── Runtime configuration ──
//
// Connection settings for the provider, resolved by the binary from its
// config layers and handed in. Nothing here reads files or the environment.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use smtp_api::{SendGridClient, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// How to reach the SendGrid API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_host: Url,
    pub api_key: SecretString,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(api_host: Url, api_key: SecretString) -> Self {
        Self {
            api_host,
            api_key,
            timeout: TransportConfig::default().timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the live client.
    pub fn connect(&self) -> Result<SendGridClient, CoreError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(CoreError::InvalidConfig {
                message: format!("no API key configured, set {}", smtp_api::ENV_API_KEY),
            });
        }
        let transport = TransportConfig::default().with_timeout(self.timeout);
        SendGridClient::from_api_key(self.api_host.as_str(), &self.api_key, &transport).map_err(
            |e| CoreError::InvalidConfig {
                message: format!("cannot build SendGrid client: {e}"),
            },
        )
    }
}
