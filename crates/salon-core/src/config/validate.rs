//! Configuration validation with range checks.

use std::collections::HashSet;

use crate::error::ConfigError;

use super::Config;

/// Resolution tiers accepted by the image model.
const IMAGE_SIZES: &[&str] = &["1K", "2K", "4K"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.proxy.endpoint.starts_with("http://")
            || self.proxy.endpoint.starts_with("https://"))
        {
            return Err(ConfigError::ValidationError(
                "proxy.endpoint must be an http(s) URL".into(),
            ));
        }
        if self.proxy.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "proxy.timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.max_photo_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_photo_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_asset_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_asset_size_mb must be > 0".into(),
            ));
        }
        if !is_valid_aspect_ratio(&self.generation.aspect_ratio) {
            return Err(ConfigError::ValidationError(format!(
                "generation.aspect_ratio must look like \"2:3\", got \"{}\"",
                self.generation.aspect_ratio
            )));
        }
        if !IMAGE_SIZES.contains(&self.generation.image_size.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "generation.image_size must be one of {}, got \"{}\"",
                IMAGE_SIZES.join(", "),
                self.generation.image_size
            )));
        }
        self.validate_styles()
    }

    fn validate_styles(&self) -> Result<(), ConfigError> {
        if self.styles.is_empty() {
            return Err(ConfigError::ValidationError(
                "styles must contain at least one entry".into(),
            ));
        }
        let mut seen = HashSet::new();
        for style in &self.styles {
            if !seen.insert(style.id) {
                return Err(ConfigError::ValidationError(format!(
                    "styles: duplicate id {}",
                    style.id
                )));
            }
            if style.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "styles: id {} has an empty name",
                    style.id
                )));
            }
            if style.image.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "styles: id {} has an empty image",
                    style.id
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_aspect_ratio(value: &str) -> bool {
    let Some((w, h)) = value.split_once(':') else {
        return false;
    };
    matches!(
        (w.parse::<u32>(), h.parse::<u32>()),
        (Ok(w), Ok(h)) if w > 0 && h > 0
    )
}
