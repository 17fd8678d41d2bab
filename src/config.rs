use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::constants::DEFAULT_BASE_URL;
use crate::tui::ThemeVariant;

/// Environment variable that overrides `backend.base_url`
pub const BACKEND_URL_ENV: &str = "HEALTHAPP_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Timed reveals on intro and completion steps
    #[serde(default = "default_animations")]
    pub animations: bool,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_animations() -> bool {
    true
}

fn default_log_file() -> String {
    "healthapp-onboarding.log".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            animations: default_animations(),
            log_file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("healthapp-onboarding")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".healthapp-onboarding")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config file, then apply the environment override
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_from(&Self::get_config_path()?)?;
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            debug!("Backend URL overridden by {}", BACKEND_URL_ENV);
            config.backend.base_url = url;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        if !path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", path);

        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
                info!("Created config directory: {:?}", dir);
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Backend URL must start with http:// or https://, got '{}'", url);
        }

        info!("Setting backend URL to: {}", url);
        self.backend.base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    pub fn set_theme(&mut self, theme: ThemeVariant) {
        info!("Setting theme to: {:?}", theme);
        self.settings.theme = theme;
    }
}
