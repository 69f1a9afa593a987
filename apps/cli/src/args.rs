//! Command line definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "psf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Sponsorship pricing and PostgreSQL tuning from the command line")]
pub struct Cli {
    /// Log at debug level (stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Truncate a byte count to four significant bits and print it with a unit
    Round {
        /// Size in bytes
        bytes: u64,
    },
    /// Print recommended postgresql.conf settings
    Pgtune(PgtuneArgs),
    /// Price a package and benefit selection against a catalog
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
pub struct PgtuneArgs {
    /// Workload: dw, oltp, web, mixed or desktop
    #[arg(short, long)]
    pub db_type: Option<String>,
    /// Total memory as `<n>kB`; read from the host when omitted
    #[arg(short, long)]
    pub total_memory: Option<String>,
    /// Override the workload's connection count
    #[arg(short = 'c', long)]
    pub max_connections: Option<String>,
    /// Machine architecture as `uname -m` prints it
    #[arg(short, long)]
    pub machine: Option<String>,
    /// PostgreSQL server version
    #[arg(long = "pg-version")]
    pub version: Option<String>,
    /// Server config file whose `[pgtune]` section supplies defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print JSON instead of postgresql.conf lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// JSON catalog of packages and benefits
    #[arg(long)]
    pub catalog: PathBuf,
    /// Package to start from
    #[arg(short, long)]
    pub package: Option<String>,
    /// Benefit to check (repeatable)
    #[arg(short, long = "benefit")]
    pub benefits: Vec<String>,
    /// Bundled benefit to uncheck (repeatable)
    #[arg(short = 'x', long = "without")]
    pub without: Vec<String>,
    /// Print the resulting form and cost as JSON
    #[arg(long)]
    pub json: bool,
}
