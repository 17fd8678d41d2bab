use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use healthapp_onboarding::cli::commands::{config_command, start_command, steps_command};
use healthapp_onboarding::cli::{Cli, Commands};
use healthapp_onboarding::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.overrides.apply(&mut config)?;

    // Initialize logger to file (truncate on each run), the terminal belongs to the TUI
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.settings.log_file)
        .with_context(|| format!("Failed to open log file {}", config.settings.log_file))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting healthapp-onboarding {}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => start_command(config).await,
        Commands::Steps => steps_command(),
        Commands::Config(args) => config_command(args),
    }
}
