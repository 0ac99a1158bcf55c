mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smtp_core::SendGridProvisioner;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbosity = if cli.global.debug {
        cli.global.verbose.max(1)
    } else {
        cli.global.verbose
    };
    init_tracing(verbosity);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Version => output::print_output(env!("CARGO_PKG_VERSION")),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "smtp-service", &mut std::io::stdout());
            Ok(())
        }

        Command::Provision(cmd) => {
            let settings = config::resolve(&cli.global)?;
            let provisioner = SendGridProvisioner::from_config(&settings.provider)?;

            tracing::debug!(
                command = ?cmd,
                api_host = %settings.provider.api_host,
                "dispatching command"
            );
            commands::dispatch(cmd, &provisioner, &settings).await
        }
    }
}
