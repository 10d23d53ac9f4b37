use crate::error::{PopmarkError, Result};
use crate::icons::DEFAULT_ICONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage key holding the flat bookmark list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Icons picked at random when a saved bookmark has no valid icon
    #[serde(default = "default_icons")]
    pub default_icons: Vec<String>,

    /// How long the import error notice stays visible
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,

    /// Directory for exported files; the current directory when unset
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_icons: default_icons(),
            notice_seconds: default_notice_seconds(),
            export_dir: None,
        }
    }
}

fn default_storage_key() -> String {
    "bookmarks".to_string()
}

fn default_icons() -> Vec<String> {
    DEFAULT_ICONS.iter().map(|s| s.to_string()).collect()
}

fn default_notice_seconds() -> u64 {
    3
}

impl Config {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/popmark/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load config from {:?}: {}", config_path, e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(PopmarkError::Config("storage_key must not be empty".into()));
        }
        Ok(())
    }
}
