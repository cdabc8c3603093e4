//! Configuration management for Salon.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default` with the shipped values,
//! including the built-in style catalog.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::types::StyleOption;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Proxy endpoint settings
    pub proxy: ProxyConfig,

    /// Output image parameters
    pub generation: GenerationConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Access token persistence
    pub storage: StorageConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Style catalog
    pub styles: Vec<StyleOption>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            proxy: ProxyConfig::default(),
            generation: GenerationConfig::default(),
            limits: LimitsConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            styles: default_styles(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.salon.salon/config.toml
    /// - Linux: ~/.config/salon/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\salon\config\config.toml
    ///
    /// Falls back to ~/.salon/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "salon", "salon")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| home_fallback().join("config.toml"))
    }

    /// Get the resolved credentials file path.
    pub fn token_path(&self) -> PathBuf {
        match &self.storage.token_file {
            Some(path) => expand(path),
            None => directories::ProjectDirs::from("com", "salon", "salon")
                .map(|dirs| dirs.data_dir().to_path_buf().join("credentials.toml"))
                .unwrap_or_else(|| home_fallback().join("credentials.toml")),
        }
    }

    /// Get the resolved style asset directory (with ~ expansion).
    pub fn asset_dir(&self) -> PathBuf {
        expand(&self.general.asset_dir)
    }

    /// Get the resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.general.output_dir)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

fn home_fallback() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".salon")
}
