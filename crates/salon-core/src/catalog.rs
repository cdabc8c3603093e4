//! Read-only lookup over the configured style presets.

use crate::config::Config;
use crate::types::StyleOption;

/// The immutable set of styles available for a session.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: Vec<StyleOption>,
}

impl StyleCatalog {
    pub fn new(styles: Vec<StyleOption>) -> Self {
        Self { styles }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.styles.clone())
    }

    /// Look up a style by its stable id.
    pub fn find(&self, id: u32) -> Option<&StyleOption> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleOption> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
