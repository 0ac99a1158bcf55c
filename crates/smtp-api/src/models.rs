//! SendGrid v3 resource and request types.
//!
//! Only the fields the provisioning flow reads are modeled; the provider
//! returns more. Fields use `#[serde(default)]` where SendGrid omits them
//! depending on the endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Sub-users ────────────────────────────────────────────────────────

/// A SendGrid sub-user, from `GET /v3/subusers` or `POST /v3/subusers`.
///
/// The list endpoint reports the numeric id as `id`, the create endpoint
/// as `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubUser {
    #[serde(default, alias = "user_id")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Filter for `GET /v3/subusers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubUserQuery {
    pub username: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SubUserQuery {
    /// Equality filter on the sub-user's username.
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Render as query-string pairs; unset fields are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref username) = self.username {
            params.push(("username", username.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

/// Body of `POST /v3/subusers`.
#[derive(Debug, Serialize)]
pub struct CreateSubUserRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub ips: &'a [String],
}

// ── API keys ─────────────────────────────────────────────────────────

/// A SendGrid API key.
///
/// `api_key` holds the secret and is only guaranteed on creation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub api_key_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("api_key_id", &self.api_key_id)
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// `GET /v3/api_keys` wraps its payload as `{ "result": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiKeyList {
    #[serde(default)]
    pub result: Vec<ApiKey>,
}

/// Body of `POST /v3/api_keys`.
#[derive(Debug, Serialize)]
pub struct CreateApiKeyRequest<'a> {
    pub name: &'a str,
    pub scopes: &'a [String],
}

// ── IP addresses ─────────────────────────────────────────────────────

/// An IP address owned by the parent account, from `GET /v3/ips`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    pub ip: String,
    #[serde(default)]
    pub warmup: bool,
    #[serde(default)]
    pub start_date: Option<i64>,
    #[serde(default)]
    pub subusers: Vec<String>,
    #[serde(default)]
    pub rdns: Option<String>,
    #[serde(default)]
    pub pools: Vec<String>,
}
