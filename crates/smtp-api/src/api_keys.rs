// API key endpoints
//
// Keys are always managed on behalf of a sub-user: the parent account's
// bearer token plus the `on-behalf-of` header scopes the call.

use reqwest::StatusCode;
use tracing::debug;

use crate::client::SendGridClient;
use crate::error::Error;
use crate::models::{ApiKey, ApiKeyList, CreateApiKeyRequest};

pub const ROUTE_API_KEYS: &str = "v3/api_keys";

impl SendGridClient {
    /// List the API keys belonging to a sub-user.
    ///
    /// `GET /v3/api_keys` with `on-behalf-of: {username}`
    pub async fn list_api_keys_for_subuser(&self, username: &str) -> Result<Vec<ApiKey>, Error> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be a non-empty string"));
        }
        let url = self.url(ROUTE_API_KEYS)?;
        debug!(username, "listing api keys");
        let list: ApiKeyList = self.get(url, &[], Some(username)).await?;
        Ok(list.result)
    }

    /// Create an API key named after the sub-user with the given scopes.
    ///
    /// `POST /v3/api_keys` with `on-behalf-of: {username}` -- answers `201 Created`.
    pub async fn create_api_key_for_subuser(
        &self,
        username: &str,
        scopes: &[String],
    ) -> Result<ApiKey, Error> {
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must be a non-empty string"));
        }
        let url = self.url(ROUTE_API_KEYS)?;
        let body = CreateApiKeyRequest {
            name: username,
            scopes,
        };
        debug!(username, ?scopes, "creating api key");
        self.post(url, &body, Some(username), StatusCode::CREATED)
            .await
    }
}
