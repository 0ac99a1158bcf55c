//! SMTP connection details handed to a cluster.

use std::fmt;

use secrecy::SecretString;
use smtp_api::ApiKey;

pub const SMTP_HOST: &str = "smtp.sendgrid.net";
pub const SMTP_PORT: u16 = 587;
pub const SMTP_TLS: bool = true;
/// SendGrid SMTP relays authenticate any API key with this fixed username.
pub const SMTP_USERNAME: &str = "apikey";

/// Credentials and endpoint a cluster uses to relay mail.
///
/// `password` is the API key secret; `id` is the provider id of that key.
#[derive(Clone)]
pub struct SmtpDetails {
    pub id: String,
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub username: String,
    pub password: SecretString,
}

impl SmtpDetails {
    /// Details for the SendGrid relay, authenticating with `password`.
    pub fn new(id: impl Into<String>, password: SecretString) -> Self {
        Self {
            id: id.into(),
            host: SMTP_HOST.to_owned(),
            port: SMTP_PORT,
            tls: SMTP_TLS,
            username: SMTP_USERNAME.to_owned(),
            password,
        }
    }

    pub fn from_api_key(key: &ApiKey) -> Self {
        Self::new(key.api_key_id.clone(), SecretString::from(key.api_key.clone()))
    }
}

impl fmt::Debug for SmtpDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpDetails")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
