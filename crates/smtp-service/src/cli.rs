//! Clap derive structures for the `smtp-service` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// smtp-service -- per-cluster SendGrid SMTP credentials
#[derive(Debug, Parser)]
#[command(
    name = "smtp-service",
    version,
    about = "Commands for managing cluster SMTP credentials on SendGrid",
    long_about = "Creates, looks up, rotates and deletes the SendGrid sub user and\n\
        API key backing a cluster. Credentials are printed as a Kubernetes\n\
        Secret ready to be applied to the cluster.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (default: $XDG_CONFIG_HOME/smtp-service/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SendGrid API key
    #[arg(long, env = "SENDGRID_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// SendGrid API base URL
    #[arg(long, env = "SENDGRID_API_HOST", global = true, value_name = "URL")]
    pub api_host: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SENDGRID_TIMEOUT", global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable debug output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Provision(ProvisionCommand),

    /// Print the version
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Commands that talk to SendGrid.
#[derive(Debug, Subcommand)]
pub enum ProvisionCommand {
    /// Create the sub user and API key for a cluster and print them as a secret
    Create(SecretArgs),

    /// Print the id of the API key associated with a cluster
    Get(ClusterArgs),

    /// Delete the sub user, and with it the API key, of a cluster
    Delete(ClusterArgs),

    /// Replace the API key of an existing cluster and print it as a secret
    Refresh(SecretArgs),
}

#[derive(Debug, Args)]
pub struct ClusterArgs {
    /// Cluster id, used as the sub user name and API key name
    pub cluster_id: String,
}

#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Cluster id, used as the sub user name and API key name
    pub cluster_id: String,

    /// Name of the output secret
    #[arg(long, short = 's', value_name = "NAME")]
    pub secret_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
