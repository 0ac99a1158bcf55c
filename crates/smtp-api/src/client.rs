// SendGrid HTTP client
//
// Wraps `reqwest::Client` with SendGrid URL construction, the on-behalf-of
// delegation header and status-code checking. Endpoint groups (sub-users,
// API keys, IPs) are implemented as inherent methods in separate files to
// keep this module focused on transport mechanics.

use std::fmt;

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::HEADER_ON_BEHALF_OF;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for the SendGrid v3 API.
///
/// Stateless beyond its connection config: every method maps to exactly
/// one HTTP request and makes a single attempt.
pub struct SendGridClient {
    http: reqwest::Client,
    base_url: Url,
}

impl fmt::Debug for SendGridClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SendGridClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: Bearer <key>` as a default header.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_bearer_client(api_key)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidArgument("API host must be an absolute http(s) URL"));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative route (e.g. `"v3/subusers"`) onto the base URL.
    pub(crate) fn url(&self, route: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(route)?)
    }

    /// `{base}/{route}/{name}`, with `name` percent-encoded as one segment.
    pub(crate) fn resource_url(&self, route: &str, name: &str) -> Result<Url, Error> {
        let mut url = self.url(route)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidArgument("API host must be an absolute http(s) URL"))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
        on_behalf_of: Option<&str>,
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let mut req = self.http.get(url).query(params);
        if let Some(username) = on_behalf_of {
            req = req.header(HEADER_ON_BEHALF_OF, username);
        }
        let resp = req.send().await?;
        self.handle_response(resp, None).await
    }

    /// Send a POST request with a JSON body, requiring `expected` status.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        on_behalf_of: Option<&str>,
        expected: StatusCode,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let mut req = self.http.post(url).json(body);
        if let Some(username) = on_behalf_of {
            req = req.header(HEADER_ON_BEHALF_OF, username);
        }
        let resp = req.send().await?;
        self.handle_response(resp, Some(expected)).await
    }

    /// Send a DELETE request, requiring `expected` status and ignoring the body.
    pub(crate) async fn delete(&self, url: Url, expected: StatusCode) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        check_status(status, Some(expected), body).map(|_| ())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        expected: Option<StatusCode>,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        let body = check_status(status, expected, body)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Pass the body through on success, otherwise turn the status into an error.
fn check_status(
    status: StatusCode,
    expected: Option<StatusCode>,
    body: String,
) -> Result<String, Error> {
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    match expected {
        Some(expected) if expected != status => Err(Error::UnexpectedStatus {
            expected: expected.as_u16(),
            status: status.as_u16(),
            body,
        }),
        _ => Ok(body),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> SendGridClient {
        SendGridClient::from_reqwest(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn debug_shows_only_base_url() {
        let rendered = format!("{:?}", client("https://api.sendgrid.com"));
        assert_eq!(
            rendered,
            "SendGridClient { base_url: \"https://api.sendgrid.com/\", .. }"
        );
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        assert_eq!(
            client("https://api.sendgrid.com").base_url().as_str(),
            "https://api.sendgrid.com/"
        );
        assert_eq!(
            client("http://localhost:8080/proxy/").base_url().as_str(),
            "http://localhost:8080/proxy/"
        );
    }

    #[test]
    fn route_joins_onto_base_path() {
        let c = client("http://localhost:8080/proxy");
        assert_eq!(
            c.url("v3/subusers").unwrap().as_str(),
            "http://localhost:8080/proxy/v3/subusers"
        );
    }

    #[test]
    fn resource_name_is_one_encoded_segment() {
        let c = client("https://api.sendgrid.com");
        assert_eq!(
            c.resource_url("v3/subusers", "a/b c").unwrap().as_str(),
            "https://api.sendgrid.com/v3/subusers/a%2Fb%20c"
        );
    }

    #[test]
    fn non_base_url_is_rejected() {
        let err = SendGridClient::from_reqwest("mailto:ops@example.com", reqwest::Client::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn status_checks() {
        assert!(check_status(StatusCode::OK, None, String::new()).is_ok());
        assert!(matches!(
            check_status(StatusCode::OK, Some(StatusCode::CREATED), String::new()),
            Err(Error::UnexpectedStatus {
                expected: 201,
                status: 200,
                ..
            })
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_REQUEST, Some(StatusCode::CREATED), "bad".into()),
            Err(Error::Api { status: 400, .. })
        ));
    }
}
