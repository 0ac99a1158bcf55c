// Shared transport configuration for building reqwest::Client instances.
//
// The live SendGrid client authenticates every call with a bearer token,
// injected once here as a default header rather than per request.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const DEFAULT_USER_AGENT: &str = concat!("smtp-service/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with additional default headers.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()?;
        Ok(client)
    }

    /// Build a `reqwest::Client` that sends `Authorization: Bearer <key>`
    /// on every request.
    pub fn build_bearer_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_header(api_key)?);
        self.build_client_with_headers(headers)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn bearer_header(api_key: &SecretString) -> Result<HeaderValue, Error> {
    let token = api_key.expose_secret();
    if token.is_empty() {
        return Err(Error::InvalidApiKey("API key must be a non-empty string".into()));
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| Error::InvalidApiKey(format!("invalid header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
