//! `create`: provision a cluster and print its secret.

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
        .create(&args.cluster_id)
        .await
        .map_err(|e| CliError::provisioning(Operation::Create, &args.cluster_id, e))?;
    tracing::debug!("smtp details created successfully, converting to secret");
    super::print_secret(&details, args.secret_name.as_deref(), settings)
}
