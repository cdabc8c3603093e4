//! In-memory selection state: the chosen style and the uploaded photo.
//!
//! A new pick simply overwrites the previous one. Generation is only
//! reachable through [`SelectionState::ready`], so an incomplete selection
//! cannot be submitted at all.

use crate::types::StyleOption;
use std::path::{Path, PathBuf};

/// What the user has picked so far in this session.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_style: Option<StyleOption>,
    customer_photo: Option<PathBuf>,
    customer_photo_encoded: Option<String>,
}

/// A selection with every field the generation request needs.
#[derive(Debug, Clone, Copy)]
pub struct ReadySelection<'a> {
    pub style: &'a StyleOption,
    /// Base64 payload of the customer photo, no data-URI prefix
    pub photo: &'a str,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_style(&mut self, style: StyleOption) {
        tracing::debug!(style_id = style.id, "Style selected: {}", style.name);
        self.selected_style = Some(style);
    }

    /// Record the uploaded photo and its base64 payload.
    pub fn set_customer_photo(&mut self, path: PathBuf, encoded: String) {
        tracing::debug!("Customer photo set: {:?} ({} base64 chars)", path, encoded.len());
        self.customer_photo = Some(path);
        self.customer_photo_encoded = Some(encoded);
    }

    pub fn selected_style(&self) -> Option<&StyleOption> {
        self.selected_style.as_ref()
    }

    pub fn customer_photo(&self) -> Option<&Path> {
        self.customer_photo.as_deref()
    }

    /// Whether the generate trigger should be enabled.
    pub fn can_generate(&self) -> bool {
        self.ready().is_some()
    }

    /// Borrow the selection for a generation attempt, if it is complete.
    pub fn ready(&self) -> Option<ReadySelection<'_>> {
        let style = self.selected_style.as_ref()?;
        let photo = self
            .customer_photo_encoded
            .as_deref()
            .filter(|p| !p.is_empty())?;
        Some(ReadySelection { style, photo })
    }
}
