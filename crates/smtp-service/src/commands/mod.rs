//! Command dispatch: bridges CLI args -> provisioner calls -> output.

pub mod create;
pub mod delete;
pub mod get;
pub mod refresh;

use smtp_api::ProviderApi;
use smtp_core::{PasswordGenerator, SmtpDetails, SmtpProvisioner, render_secret};

use crate::cli::ProvisionCommand;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Dispatch a provider-bound command to its handler.
pub async fn dispatch<A, P>(
    cmd: ProvisionCommand,
    provisioner: &SmtpProvisioner<A, P>,
    settings: &Settings,
) -> Result<(), CliError>
where
    A: ProviderApi,
    P: PasswordGenerator,
{
    match cmd {
        ProvisionCommand::Create(args) => create::handle(provisioner, args, settings).await,
        ProvisionCommand::Get(args) => get::handle(provisioner, args).await,
        ProvisionCommand::Delete(args) => delete::handle(provisioner, args).await,
        ProvisionCommand::Refresh(args) => refresh::handle(provisioner, args, settings).await,
    }
}

/// Print `details` as a secret named by the flag, else by the config.
fn print_secret(
    details: &SmtpDetails,
    secret_name: Option<&str>,
    settings: &Settings,
) -> Result<(), CliError> {
    let name = secret_name.unwrap_or(&settings.secret_name);
    if name.is_empty() {
        tracing::info!(
            default = smtp_core::DEFAULT_SECRET_NAME,
            "secret name is blank, using default name"
        );
    }
    let secret = render_secret(details, name);
    output::print_output(&output::render_json(&secret)?)
}
