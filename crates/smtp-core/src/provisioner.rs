//! Per-cluster SMTP credential provisioning.
//!
//! A cluster is backed by one SendGrid sub-user whose username is the
//! cluster id, plus one API key on that sub-user named after the cluster.
//! The key secret becomes the SMTP password. Every operation re-reads
//! provider state; nothing is cached between calls.

use secrecy::SecretString;
use smtp_api::{ProviderApi, SendGridClient, SubUser};
use tracing::{Instrument, Span, debug, info, info_span, warn};

use crate::config::ProviderConfig;
use crate::details::SmtpDetails;
use crate::error::CoreError;
use crate::password::{PasswordGenerator, PasswordPolicy, RandomPasswordGenerator};

/// Provisioner wired to the live SendGrid API.
pub type SendGridProvisioner = SmtpProvisioner<SendGridClient, RandomPasswordGenerator>;

/// Domain used to synthesize a contact address for new sub-users.
const CONTACT_EMAIL_DOMAIN: &str = "email.com";

/// Orchestrates sub-users and API keys to issue SMTP credentials.
///
/// Operations run inside `span` (by default
/// `smtp_details{provider="sendgrid"}`), each under a child span carrying
/// the cluster id.
pub struct SmtpProvisioner<A, P> {
    api: A,
    api_key_scopes: Vec<String>,
    password_generator: P,
    span: Span,
}

impl SendGridProvisioner {
    /// Connect to SendGrid with the default key scopes.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, CoreError> {
        let api = config.connect()?;
        Self::new(
            api,
            smtp_api::default_api_key_scopes(),
            RandomPasswordGenerator,
        )
    }
}

impl<A: ProviderApi, P: PasswordGenerator> SmtpProvisioner<A, P> {
    pub fn new(
        api: A,
        api_key_scopes: Vec<String>,
        password_generator: P,
    ) -> Result<Self, CoreError> {
        if api_key_scopes.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "api key scopes should be a non-empty list".into(),
            });
        }
        Ok(Self {
            api,
            api_key_scopes,
            password_generator,
            span: info_span!("smtp_details", provider = smtp_api::PROVIDER_NAME),
        })
    }

    /// Replace the logging context operations run under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_key_scopes(&self) -> &[String] {
        &self.api_key_scopes
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Issue credentials for `cluster_id`, creating its sub-user if needed.
    ///
    /// Fails with `AlreadyExists` when the sub-user already holds a key
    /// named after the cluster.
    pub async fn create(&self, cluster_id: &str) -> Result<SmtpDetails, CoreError> {
        let span = info_span!(parent: &self.span, "create", cluster_id);
        self.create_details(cluster_id).instrument(span).await
    }

    /// Look up the existing credentials for `cluster_id`.
    pub async fn get(&self, cluster_id: &str) -> Result<SmtpDetails, CoreError> {
        let span = info_span!(parent: &self.span, "get", cluster_id);
        self.get_details(cluster_id).instrument(span).await
    }

    /// Delete the sub-user backing `cluster_id`, and with it all its keys.
    pub async fn delete(&self, cluster_id: &str) -> Result<(), CoreError> {
        let span = info_span!(parent: &self.span, "delete", cluster_id);
        self.delete_subuser(cluster_id).instrument(span).await
    }

    /// Rotate credentials: delete the whole sub-user, then create afresh.
    ///
    /// A cluster without a sub-user fails with `NotExist` and nothing is
    /// created.
    pub async fn refresh(&self, cluster_id: &str) -> Result<SmtpDetails, CoreError> {
        let span = info_span!(parent: &self.span, "refresh", cluster_id);
        async {
            self.delete_subuser(cluster_id).await?;
            self.create_details(cluster_id).await
        }
        .instrument(span)
        .await
    }

    // ── Steps ────────────────────────────────────────────────────────

    async fn create_details(&self, cluster_id: &str) -> Result<SmtpDetails, CoreError> {
        validate_cluster_id(cluster_id)?;

        let subuser = match self.lookup_subuser(cluster_id).await? {
            Some(subuser) => {
                debug!(username = %subuser.username, "reusing existing sub user");
                subuser
            }
            None => self.create_subuser(cluster_id).await?,
        };

        let keys = self
            .api
            .list_api_keys_for_subuser(&subuser.username)
            .await
            .map_err(|e| {
                CoreError::provider(
                    format!("failed to list api keys for sub user {}", subuser.username),
                    e,
                )
            })?;
        if keys.iter().any(|k| k.name == cluster_id) {
            return Err(CoreError::AlreadyExists {
                message: format!(
                    "api key {cluster_id} for sub user {} already exists",
                    subuser.username
                ),
            });
        }

        let key = self
            .api
            .create_api_key_for_subuser(&subuser.username, &self.api_key_scopes)
            .await
            .map_err(|e| {
                CoreError::provider(
                    format!("failed to create api key for sub user {}", subuser.username),
                    e,
                )
            })?;
        info!(api_key_id = %key.api_key_id, username = %subuser.username, "created api key");

        Ok(SmtpDetails::from_api_key(&key))
    }

    async fn create_subuser(&self, cluster_id: &str) -> Result<SubUser, CoreError> {
        debug!("no sub user found, creating one");

        let ips = self
            .api
            .list_ip_addresses()
            .await
            .map_err(|e| CoreError::provider("failed to list ip addresses", e))?;
        let ip = ips.into_iter().next().ok_or(CoreError::NoIpAddresses)?;
        debug!(ip = %ip.ip, "assigning ip address to sub user");

        let email = contact_email(cluster_id);
        let password: SecretString = self.password_generator.generate(&PasswordPolicy::SUB_USER)?;

        let subuser = self
            .api
            .create_subuser(cluster_id, &email, &password, &[ip.ip])
            .await
            .map_err(|e| {
                CoreError::provider(format!("failed to create sub user {cluster_id}"), e)
            })?;
        info!(id = subuser.id, username = %subuser.username, "created sub user");
        Ok(subuser)
    }

    async fn get_details(&self, cluster_id: &str) -> Result<SmtpDetails, CoreError> {
        validate_cluster_id(cluster_id)?;
        let subuser = self.require_subuser(cluster_id).await?;

        let keys = self
            .api
            .list_api_keys_for_subuser(&subuser.username)
            .await
            .map_err(|e| {
                CoreError::provider(
                    format!("failed to list api keys for sub user {}", subuser.username),
                    e,
                )
            })?;
        if keys.is_empty() {
            return Err(CoreError::NotExist {
                message: format!("no api keys found for sub user {}", subuser.username),
            });
        }

        let Some(key) = keys.iter().find(|k| k.name == subuser.username) else {
            return Err(CoreError::NotExist {
                message: format!(
                    "api key {} not found for sub user {}",
                    subuser.username, subuser.username
                ),
            });
        };
        if key.api_key.is_empty() {
            warn!(api_key_id = %key.api_key_id, "provider returned api key without secret");
        }
        debug!(api_key_id = %key.api_key_id, "found api key");

        Ok(SmtpDetails::from_api_key(key))
    }

    async fn delete_subuser(&self, cluster_id: &str) -> Result<(), CoreError> {
        validate_cluster_id(cluster_id)?;
        let subuser = self.require_subuser(cluster_id).await?;
        if subuser.username != cluster_id {
            return Err(CoreError::Mismatch {
                expected: cluster_id.to_owned(),
                found: subuser.username,
            });
        }

        self.api.delete_subuser(cluster_id).await.map_err(|e| {
            CoreError::provider(format!("failed to delete sub user {cluster_id}"), e)
        })?;
        info!(id = subuser.id, "deleted sub user");
        Ok(())
    }

    /// `None` when the provider has no unique sub-user named `username`.
    ///
    /// Any failed request, 404 included, is an error rather than a miss.
    async fn lookup_subuser(&self, username: &str) -> Result<Option<SubUser>, CoreError> {
        match self.api.get_subuser_by_username(username).await {
            Ok(subuser) => Ok(Some(subuser)),
            Err(e) if e.is_not_found() => {
                debug!(error = %e, "sub user lookup found no match");
                Ok(None)
            }
            Err(e) => Err(CoreError::provider(
                format!("failed to check if sub user {username} exists"),
                e,
            )),
        }
    }

    async fn require_subuser(&self, username: &str) -> Result<SubUser, CoreError> {
        self.lookup_subuser(username)
            .await?
            .ok_or_else(|| CoreError::NotExist {
                message: format!("sub user {username} not found"),
            })
    }
}

fn validate_cluster_id(cluster_id: &str) -> Result<(), CoreError> {
    if cluster_id.is_empty() {
        return Err(CoreError::InvalidConfig {
            message: "cluster id must be a non-empty string".into(),
        });
    }
    Ok(())
}

/// Cluster ids that already look like an address are used verbatim.
fn contact_email(cluster_id: &str) -> String {
    if cluster_id.contains('@') {
        cluster_id.to_owned()
    } else {
        format!("{cluster_id}@{CONTACT_EMAIL_DOMAIN}")
    }
}
