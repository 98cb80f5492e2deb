use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "certify",
    version,
    about = "Certificate verification: file integrity, metadata, ledger, signature and timestamp checks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify already-uploaded certificate records from a manifest
    Verify(VerifyArgs),
    /// Validate upload forms, then verify the accepted certificates
    Upload(UploadArgs),
    /// Look up a published certificate by id, transaction id or block hash
    Lookup(LookupArgs),
    /// Write a sample config file
    Init(InitArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Flags shared by every command that scores certificates.
#[derive(clap::Args, Debug, Clone)]
pub struct ScoringArgs {
    #[arg(long, default_value = "certify.yaml", env = "CERTIFY_CONFIG")]
    pub config: PathBuf,

    /// Seed for the simulated ledger and signature checks (reproducible runs)
    #[arg(long, env = "CERTIFY_SEED")]
    pub seed: Option<u64>,

    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD) instead of the wall clock
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct VerifyArgs {
    /// YAML or JSON file with a `certificates:` list
    pub manifest: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UploadArgs {
    /// YAML or JSON file with an `uploads:` list of forms
    pub forms: PathBuf,

    /// Connected wallet address; overrides `wallet:` in the forms file
    #[arg(long, env = "CERTIFY_WALLET")]
    pub wallet: Option<String>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LookupArgs {
    pub query: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "certify.yaml")]
    pub config: PathBuf,
}
