// Sub-user endpoints
//
// `/v3/subusers` is account-scoped; deletion addresses a sub-user by
// username rather than numeric id.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::SendGridClient;
use crate::error::Error;
use crate::models::{CreateSubUserRequest, SubUser, SubUserQuery};

pub const ROUTE_SUBUSERS: &str = "v3/subusers";

impl SendGridClient {
    /// List sub-users, optionally filtered.
    ///
    /// `GET /v3/subusers?username=...&limit=...&offset=...`
    pub async fn list_subusers(&self, query: &SubUserQuery) -> Result<Vec<SubUser>, Error> {
        let url = self.url(ROUTE_SUBUSERS)?;
        debug!(?query, "listing sub users");
        self.get(url, &query.to_params(), None).await
    }

    /// Create a sub-user and assign it the given IPs.
    ///
    /// `POST /v3/subusers` -- SendGrid answers `201 Created`.
    pub async fn create_subuser(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        ips: &[String],
    ) -> Result<SubUser, Error> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be a non-empty string"));
        }
        let url = self.url(ROUTE_SUBUSERS)?;
        let body = CreateSubUserRequest {
            username,
            email,
            password: password.expose_secret(),
            ips,
        };
        debug!(username, email, ?ips, "creating sub user");
        self.post(url, &body, None, StatusCode::CREATED).await
    }

    /// Delete a sub-user and, transitively, its API keys.
    ///
    /// `DELETE /v3/subusers/{username}` -- SendGrid answers `204 No Content`.
    pub async fn delete_subuser(&self, username: &str) -> Result<(), Error> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be a non-empty string"));
        }
        let url = self.resource_url(ROUTE_SUBUSERS, username)?;
        debug!(username, "deleting sub user");
        self.delete(url, StatusCode::NO_CONTENT).await
    }
}
