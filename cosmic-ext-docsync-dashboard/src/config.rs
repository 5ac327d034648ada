//! Dashboard Configuration
//!
//! Configuration management for the DocSync dashboard.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dashboard presentation
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the sync service
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Dashboard presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How many document cards the dashboard keeps on screen
    #[serde(default = "default_entries_per_page")]
    pub entries_per_page: usize,

    /// Cards per grid row
    #[serde(default = "default_cards_per_row")]
    pub cards_per_row: usize,
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_entries_per_page() -> usize {
    8
}

fn default_cards_per_row() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            entries_per_page: default_entries_per_page(),
            cards_per_row: default_cards_per_row(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("cosmic")
            .join("docsync-dashboard")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("dashboard.toml")
    }

    /// Load configuration from file, creating default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()).context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(Self::config_path(), contents).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5001");
        assert_eq!(config.dashboard.entries_per_page, 8);
        assert_eq!(config.dashboard.cards_per_row, 4);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.base_url, config.server.base_url);
        assert_eq!(
            parsed.dashboard.entries_per_page,
            config.dashboard.entries_per_page
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[server]\nbase_url = \"http://sync.lan:5001\"\n")
            .unwrap();
        assert_eq!(parsed.server.base_url, "http://sync.lan:5001");
        assert_eq!(parsed.dashboard.entries_per_page, 8);
    }
}
