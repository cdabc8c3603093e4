//! Sub-configuration structs with the shipped defaults.

use crate::types::StyleOption;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory that relative style image paths are resolved against
    pub asset_dir: PathBuf,

    /// Directory generated images are written to
    pub output_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("~/.salon/styles"),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Proxy endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Full URL of the generation proxy
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/api/generate".to_string(),
            // Image models routinely take over a minute at 2K
            timeout_ms: 180_000,
        }
    }
}

/// Output image parameters sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Aspect ratio as "W:H"
    pub aspect_ratio: String,

    /// Resolution tier: "1K", "2K" or "4K"
    pub image_size: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "2:3".to_string(),
            image_size: "2K".to_string(),
        }
    }
}

/// Resource limits for uploaded and fetched images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum customer photo size in megabytes
    pub max_photo_size_mb: u64,

    /// Maximum style reference size in megabytes
    pub max_asset_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_photo_size_mb: 20,
            max_asset_size_mb: 20,
        }
    }
}

impl LimitsConfig {
    pub fn max_photo_bytes(&self) -> u64 {
        self.max_photo_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn max_asset_bytes(&self) -> u64 {
        self.max_asset_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Access token persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Credentials file; defaults to the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// The built-in style catalog.
pub fn default_styles() -> Vec<StyleOption> {
    vec![
        StyleOption::new(
            1,
            "Hair NO1",
            "images/NO1.png",
            "Classic bob style with clean lines.",
        ),
        StyleOption::new(
            2,
            "Hair NO2",
            "images/NO2.png",
            "Elegant long layers for a sophisticated look.",
        ),
        StyleOption::new(
            3,
            "Hair NO3",
            "images/NO3.png",
            "Trendy short cut with modern texture.",
        ),
        StyleOption::new(
            4,
            "Hair NO4",
            "images/NO4.png",
            "Beautiful wavy style perfect for volume.",
        ),
        StyleOption::new(
            5,
            "Hair NO5",
            "images/NO5.png",
            "Stylish medium length with natural flow.",
        ),
        StyleOption::new(
            6,
            "Hair NO6",
            "images/NO6.png",
            "Chic pixie cut for a bold statement.",
        ),
    ]
}
