mod args;
mod commands;
mod console;
mod logging;
mod router;

use anyhow::Context;
use clap::Parser;
use tripwire_core::{LoggingConfig, load_config};

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging comes from the config file, so load it first and fall back to
    // defaults if it is broken; the error is reported below.
    let loaded = load_config(&cli.config);
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    logging::init(&logging, cli.verbose)?;

    let config = loaded.with_context(|| {
        format!("Failed to load configuration from {}", cli.config.display())
    })?;
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    router::route(cli, config).await
}
