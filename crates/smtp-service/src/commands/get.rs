//! `get`: print the id of a cluster's API key.

use smtp_api::ProviderApi;
use smtp_core::{PasswordGenerator, SmtpProvisioner};

use crate::cli::ClusterArgs;
use crate::error::{CliError, Operation};
use crate::output;

pub async fn handle<A: ProviderApi, P: PasswordGenerator>(
    provisioner: &SmtpProvisioner<A, P>,
    args: ClusterArgs,
) -> Result<(), CliError> {
    let details = provisioner
        .get(&args.cluster_id)
        .await
        .map_err(|e| CliError::provisioning(Operation::Get, &args.cluster_id, e))?;
    output::print_output(&details.id)
}
