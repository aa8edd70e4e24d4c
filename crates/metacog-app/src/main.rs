use clap::Parser;
use eyre::Result;

use metacog_app::cli::Cli;
use metacog_app::state::AppState;
use metacog_app::{commands, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(cli.log_format)?;

    let config = config::load_config()?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "opening data directory");

    let state = AppState::open(data_dir).await?;
    let now = jiff::Zoned::now();
    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &state, &config, &now, &mut stdout).await
}
