//! `delete`: remove a cluster's sub user together with its API keys.

use smtp_api::ProviderApi;
use smtp_core::{PasswordGenerator, SmtpProvisioner};

use crate::cli::ClusterArgs;
use crate::error::{CliError, Operation};
use crate::output;

pub async fn handle<A: ProviderApi, P: PasswordGenerator>(
    provisioner: &SmtpProvisioner<A, P>,
    args: ClusterArgs,
) -> Result<(), CliError> {
    provisioner
        .delete(&args.cluster_id)
        .await
        .map_err(|e| CliError::provisioning(Operation::Delete, &args.cluster_id, e))?;
    output::print_output("api key deleted")
}
