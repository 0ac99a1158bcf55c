//! Rendering of [`SmtpDetails`] as a Kubernetes `Secret` document.

use std::collections::BTreeMap;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::details::SmtpDetails;

/// Name given to the rendered secret when none is supplied.
pub const DEFAULT_SECRET_NAME: &str = "redhat-rhmi-smtp";

pub const SECRET_KEY_HOST: &str = "host";
pub const SECRET_KEY_PORT: &str = "port";
pub const SECRET_KEY_TLS: &str = "tls";
pub const SECRET_KEY_USERNAME: &str = "username";
pub const SECRET_KEY_PASSWORD: &str = "password";

const SECRET_KIND: &str = "Secret";
const SECRET_API_VERSION: &str = "v1";
const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// A `v1/Secret` with opaque byte-string data.
///
/// Serializes to the Kubernetes wire shape: `data` values are standard
/// base64 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDocument {
    pub kind: String,
    pub api_version: String,
    pub metadata: SecretMetadata,
    #[serde(with = "base64_data")]
    pub data: BTreeMap<String, Vec<u8>>,
    #[serde(rename = "type")]
    pub secret_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMetadata {
    pub name: String,
}

impl SecretDocument {
    /// Raw bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }
}

/// Map connection details onto a secret named `name`.
///
/// An empty `name` falls back to [`DEFAULT_SECRET_NAME`].
pub fn render_secret(details: &SmtpDetails, name: &str) -> SecretDocument {
    let name = if name.is_empty() {
        DEFAULT_SECRET_NAME
    } else {
        name
    };

    let data = BTreeMap::from([
        (SECRET_KEY_HOST.to_owned(), details.host.as_bytes().to_vec()),
        (SECRET_KEY_PORT.to_owned(), details.port.to_string().into_bytes()),
        (SECRET_KEY_TLS.to_owned(), details.tls.to_string().into_bytes()),
        (
            SECRET_KEY_USERNAME.to_owned(),
            details.username.as_bytes().to_vec(),
        ),
        (
            SECRET_KEY_PASSWORD.to_owned(),
            details.password.expose_secret().as_bytes().to_vec(),
        ),
    ]);

    SecretDocument {
        kind: SECRET_KIND.to_owned(),
        api_version: SECRET_API_VERSION.to_owned(),
        metadata: SecretMetadata {
            name: name.to_owned(),
        },
        data,
        secret_type: SECRET_TYPE_OPAQUE.to_owned(),
    }
}

mod base64_data {
    use std::collections::BTreeMap;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        data: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let encoded: BTreeMap<&str, String> = data
            .iter()
            .map(|(key, value)| (key.as_str(), STANDARD.encode(value)))
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                STANDARD
                    .decode(value.as_bytes())
                    .map(|bytes| (key, bytes))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}
