use anyhow::Context;
use psf::domain::config::ApiConfig;
use psf::kernel::config::load_config;
use psf_logger::{LevelFilter, Logger};
use psf_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let level: LevelFilter = cfg.logging.level.parse().context("Invalid logging.level")?;
    let logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.logging.json);
    let _log = match &cfg.logging.path {
        Some(directory) => logger.path(directory).max_files(cfg.logging.max_files).init()?,
        None => logger.init()?,
    };

    Server::builder().config(cfg).build()?.run().await
}
