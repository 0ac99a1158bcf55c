//! `refresh`: rotate a cluster's API key and print the new secret.

use smtp_api::ProviderApi;
use smtp_core::{PasswordGenerator, SmtpProvisioner};

use crate::cli::SecretArgs;
use crate::config::Settings;
use crate::error::{CliError, Operation};

pub async fn handle<A: ProviderApi, P: PasswordGenerator>(
    provisioner: &SmtpProvisioner<A, P>,
    args: SecretArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let details = provisioner
        .refresh(&args.cluster_id)
        .await
        .map_err(|e| CliError::provisioning(Operation::Refresh, &args.cluster_id, e))?;
    tracing::debug!(api_key_id = %details.id, "smtp details refreshed, converting to secret");
    super::print_secret(&details, args.secret_name.as_deref(), settings)
}
