//! The provider capability consumed by the provisioning layer.
//!
//! [`SendGridClient`] is the live implementation; tests substitute an
//! in-memory provider.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::client::SendGridClient;
use crate::error::Error;
use crate::models::{ApiKey, IpAddress, SubUser, SubUserQuery};

/// One method per provider resource action. Each call is a single attempt.
#[async_trait]
pub trait ProviderApi: Send + Sync {
    // ── IP addresses ─────────────────────────────────────────────────
    async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>, Error>;

    // ── Sub-users ────────────────────────────────────────────────────
    async fn list_subusers(&self, query: &SubUserQuery) -> Result<Vec<SubUser>, Error>;

    async fn create_subuser(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        ips: &[String],
    ) -> Result<SubUser, Error>;

    async fn delete_subuser(&self, username: &str) -> Result<(), Error>;

    /// Look up a sub-user through an equality filter on `username`.
    ///
    /// Exactly one match is required; zero or several matches fail with
    /// [`Error::SubUserNotFound`].
    async fn get_subuser_by_username(&self, username: &str) -> Result<SubUser, Error> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be a non-empty string"));
        }
        let mut subusers = self
            .list_subusers(&SubUserQuery::by_username(username))
            .await?;
        let found = subusers.len();
        match (subusers.pop(), found) {
            (Some(subuser), 1) => Ok(subuser),
            _ => Err(Error::SubUserNotFound {
                username: username.to_owned(),
                found,
            }),
        }
    }

    // ── API keys ─────────────────────────────────────────────────────
    async fn list_api_keys_for_subuser(&self, username: &str) -> Result<Vec<ApiKey>, Error>;

    async fn create_api_key_for_subuser(
        &self,
        username: &str,
        scopes: &[String],
    ) -> Result<ApiKey, Error>;
}

#[async_trait]
impl ProviderApi for SendGridClient {
    async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>, Error> {
        SendGridClient::list_ip_addresses(self).await
    }

    async fn list_subusers(&self, query: &SubUserQuery) -> Result<Vec<SubUser>, Error> {
        SendGridClient::list_subusers(self, query).await
    }

    async fn create_subuser(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        ips: &[String],
    ) -> Result<SubUser, Error> {
        SendGridClient::create_subuser(self, username, email, password, ips).await
    }

    async fn delete_subuser(&self, username: &str) -> Result<(), Error> {
        SendGridClient::delete_subuser(self, username).await
    }

    async fn list_api_keys_for_subuser(&self, username: &str) -> Result<Vec<ApiKey>, Error> {
        SendGridClient::list_api_keys_for_subuser(self, username).await
    }

    async fn create_api_key_for_subuser(
        &self,
        username: &str,
        scopes: &[String],
    ) -> Result<ApiKey, Error> {
        SendGridClient::create_api_key_for_subuser(self, username, scopes).await
    }
}
