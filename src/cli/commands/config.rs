//! Non-interactive config management

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::config::Config;
use crate::tui::ThemeVariant;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration
    Show,
    /// Store a new backend base URL
    SetBackend {
        /// Base URL, e.g. https://example.com
        url: String,
    },
    /// Store the color theme
    SetTheme {
        #[arg(value_enum)]
        theme: ThemeVariant,
    },
    /// Restore every setting to its default
    Reset,
}

pub fn config_command(args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => show(),
        ConfigSubcommands::SetBackend { url } => {
            let mut config = stored()?;
            config.set_backend_url(&url)?;
            config.save()?;
            println!("{} Backend URL set to {}", "✓".bright_green(), config.backend.base_url.cyan());
            Ok(())
        }
        ConfigSubcommands::SetTheme { theme } => {
            let mut config = stored()?;
            config.set_theme(theme);
            config.save()?;
            println!("{} Theme set to {:?}", "✓".bright_green(), theme);
            Ok(())
        }
        ConfigSubcommands::Reset => {
            Config::default().save()?;
            println!("{} Configuration reset to defaults", "✓".bright_green());
            Ok(())
        }
    }
}

/// The file contents without environment overrides, so saving never
/// persists a value that only came from the environment
fn stored() -> Result<Config> {
    Config::load_from(&Config::get_config_path()?)
}

fn show() -> Result<()> {
    let path = Config::get_config_path()?;
    let config = Config::load()?;

    println!("{}", "Configuration".bold());
    println!("  {} {}", "File:".dimmed(), path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, showing defaults)".yellow());
    }

    println!("\n{}", "[backend]".bright_blue());
    println!("  base_url             = {}", config.backend.base_url.cyan());
    println!("  timeout_secs         = {}", config.backend.timeout_secs);
    println!("  connect_timeout_secs = {}", config.backend.connect_timeout_secs);

    println!("\n{}", "[settings]".bright_blue());
    println!("  theme      = {:?}", config.settings.theme);
    println!("  animations = {}", config.settings.animations);
    println!("  log_file   = {}", config.settings.log_file);
    Ok(())
}
