use anyhow::Context;
use clap::Parser;
use studio::domain::config::StudioConfig;
use studio::kernel::config::load_config;
use studio::storage::Storage;
use studio_cli::args::Cli;
use studio_logger::Logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: StudioConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(dir) = &cli.data_dir {
        cfg.storage.data_dir = dir.clone();
    }

    let _log = init_logger(&cfg)?;
    tracing::info!(
        data_dir = %cfg.storage.data_dir.display(),
        course = %cli.course,
        "Opening studio data"
    );

    let storage = Storage::builder()
        .root(&cfg.storage.data_dir)
        .connect()
        .await
        .context("Failed to open the data directory")?;
    let state = studio::state(cfg, storage)?;
    tracing::debug!(slices = ?state.slice_names(), "Studio state ready");

    let mut stdout = std::io::stdout().lock();
    studio_cli::run(&state, &cli, &mut stdout).await
}

fn init_logger(cfg: &StudioConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level_str(&cfg.logging.level)?
        .json(cfg.logging.json);

    let logger = match &cfg.logging.directory {
        Some(directory) => builder.path(directory).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
