//! Clap derive structures for the `mistwifi` CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mistwifi -- gather Mist Cloud organization stats as metrics
#[derive(Debug, Parser)]
#[command(
    name = "mistwifi",
    version,
    about = "Gather real time data from Mist Cloud",
    long_about = "Polls the Mist Cloud organization stats endpoint once and prints\n\
        one metric point per returned record.",
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
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "MISTWIFI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Mist API token (overrides config and auth_token_env)
    #[arg(long, global = true)]
    pub auth_token: Option<String>,

    /// Organization ID to poll
    #[arg(long, global = true)]
    pub org_id: Option<String>,

    /// Request timeout, e.g. "4s", "1m"
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// InfluxDB line protocol, streamed as points arrive
    Line,
    /// Pretty-printed JSON array
    Json,
    /// Pretty table
    Table,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one collection tick and print the resulting metrics
    Gather(GatherArgs),

    /// Print a commented sample configuration file
    SampleConfig,

    /// Print the input name and description
    Describe,
}

#[derive(Debug, Args)]
pub struct GatherArgs {
    /// Output format
    #[arg(long, short = 'o', default_value = "line")]
    pub output: OutputFormat,
}
