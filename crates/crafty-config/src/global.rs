//! Global crafty configuration
//!
//! Located at `~/.config/crafty/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global crafty configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
}

/// Control panel server endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the crafty server (no trailing path)
    pub url: String,
    /// Basic-auth user, required when the server has accounts configured
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Front-end behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Container list refresh interval while the list view is active
    pub poll_interval_ms: u64,
    /// Version preselected in the create-container form
    pub default_version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            default_version: "1.9".to_string(),
        }
    }
}

impl UiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!("Loaded config from {:?}: server={}", path, config.server.url);

        Ok(config)
    }

    /// Write the config as pretty TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "crafty").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(ConfigError::Invalid("server.url must not be empty".into()));
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.poll_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
