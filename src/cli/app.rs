use super::commands::config::ConfigCommands;
use crate::config::Config;
use crate::tui::ThemeVariant;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "healthapp-onboarding")]
#[command(version, about = "Terminal onboarding questionnaire for HealthApp")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: RunOverrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the questionnaire (default)
    Start,
    /// List the questionnaire steps and the endpoints they use
    Steps,
    /// Show or change the stored configuration
    Config(ConfigCommands),
}

/// One-run overrides layered over the config file
#[derive(Args, Debug, Default)]
pub struct RunOverrides {
    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Color theme
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeVariant>,

    /// Reveal animated pages immediately
    #[arg(long, global = true)]
    pub no_animations: bool,
}

impl RunOverrides {
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(url) = &self.backend_url {
            config.set_backend_url(url)?;
        }
        if let Some(theme) = self.theme {
            config.set_theme(theme);
        }
        if self.no_animations {
            config.settings.animations = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_optional() {
        let cli = Cli::try_parse_from(["healthapp-onboarding"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["healthapp-onboarding", "steps"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Steps)));
    }

    #[test]
    fn overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "healthapp-onboarding",
            "--backend-url",
            "http://localhost:5000/",
            "--theme",
            "latte",
            "--no-animations",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.overrides.apply(&mut config).unwrap();

        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.settings.theme, ThemeVariant::Latte);
        assert!(!config.settings.animations);
    }

    #[test]
    fn invalid_backend_url_is_rejected() {
        let overrides = RunOverrides {
            backend_url: Some("localhost".into()),
            ..Default::default()
        };
        assert!(overrides.apply(&mut Config::default()).is_err());
    }
}
