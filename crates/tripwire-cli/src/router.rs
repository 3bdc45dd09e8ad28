//! Command routing logic for CLI

use tripwire_core::TripwireConfig;

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: TripwireConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Simulate {
            name,
            script,
            fallback,
        } => commands::simulate::run(&config, &name, &script, fallback).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&cli.config, &config),
            ConfigAction::Validate => commands::config::validate(&cli.config, &config),
        },
    }
}
