//! Layered configuration for the CLI.
//!
//! Sources, lowest priority first: built-in defaults, the TOML config file,
//! `SENDGRID_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use smtp_core::{DEFAULT_SECRET_NAME, ProviderConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const ENV_PREFIX: &str = "SENDGRID_";

// ── File / environment schema ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_secret_name")]
    pub secret_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_key: None,
            timeout: default_timeout(),
            secret_name: default_secret_name(),
        }
    }
}

fn default_api_host() -> String {
    smtp_api::DEFAULT_API_HOST.into()
}

fn default_timeout() -> u64 {
    30
}

fn default_secret_name() -> String {
    DEFAULT_SECRET_NAME.into()
}

/// Everything a provisioning command needs, fully resolved.
#[derive(Debug)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub secret_name: String,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "smtp-service").map_or_else(
        || PathBuf::from(".smtp-service").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ──────────────────────────────────────────────────────────

/// Merge defaults, the config file and the environment.
///
/// An explicit `--config` path must exist; the default path is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, CliError> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(CliError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

/// Apply command-line overrides on top of the loaded config.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let config = load_config(global.config.as_deref())?;

    let api_host = global.api_host.as_deref().unwrap_or(&config.api_host);
    let api_host = Url::parse(api_host).map_err(|e| CliError::Validation {
        field: "api_host".into(),
        reason: format!("invalid URL {api_host}: {e}"),
    })?;

    let api_key = global
        .api_key
        .clone()
        .or(config.api_key)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| CliError::NoApiKey {
            path: global
                .config
                .clone()
                .unwrap_or_else(config_path)
                .display()
                .to_string(),
        })?;

    let timeout = Duration::from_secs(global.timeout.unwrap_or(config.timeout));

    Ok(Settings {
        provider: ProviderConfig::new(api_host, SecretString::from(api_key)).with_timeout(timeout),
        secret_name: config.secret_name,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn global(config: &Path) -> GlobalOpts {
        GlobalOpts {
            config: Some(config.to_path_buf()),
            api_key: None,
            api_host: None,
            timeout: None,
            debug: false,
            verbose: 0,
        }
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_values_from_file() {
        let file = config_file(
            r#"
api_host = "https://sendgrid.example.com"
api_key = "SG.from-file"
timeout = 5
secret_name = "custom-smtp"
"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api_host, "https://sendgrid.example.com");
        assert_eq!(config.api_key.as_deref(), Some("SG.from-file"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.secret_name, "custom-smtp");
    }

    #[test]
    fn flags_override_file() {
        let file = config_file("api_key = \"SG.from-file\"\ntimeout = 5\n");
        let mut opts = global(file.path());
        opts.api_key = Some("SG.from-flag".into());
        opts.api_host = Some("http://127.0.0.1:9000".into());
        opts.timeout = Some(12);

        let settings = resolve(&opts).unwrap();
        assert_eq!(settings.provider.api_key.expose_secret(), "SG.from-flag");
        assert_eq!(settings.provider.api_host.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(settings.provider.timeout, Duration::from_secs(12));
        assert_eq!(settings.secret_name, DEFAULT_SECRET_NAME);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(CliError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn invalid_host_is_a_validation_error() {
        let file = config_file("api_key = \"SG.key\"\napi_host = \"not a url\"\n");
        assert!(matches!(
            resolve(&global(file.path())),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let file = config_file("api_key = \"\"\n");
        assert!(matches!(
            resolve(&global(file.path())),
            Err(CliError::NoApiKey { .. })
        ));
    }
}
