use clap::Parser;
use psf_cli::Cli;
use psf_logger::{LevelFilter, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    psf_cli::run(cli, &mut std::io::stdout().lock())
}
