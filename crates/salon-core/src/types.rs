//! Core data types shared across the try-on lifecycle.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A preset hairstyle the user can pick.
///
/// Loaded once from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOption {
    /// Stable, unique identifier
    pub id: u32,

    /// Display name (e.g., "Hair NO1")
    pub name: String,

    /// Reference image: a path relative to the asset directory, an absolute
    /// path, or an http(s) URL
    pub image: String,

    /// Short human-readable description
    #[serde(default)]
    pub description: String,
}

impl StyleOption {
    pub fn new(id: u32, name: &str, image: &str, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            image: image.to_string(),
            description: description.to_string(),
        }
    }
}

/// A generated image returned by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// MIME type (e.g., "image/png")
    pub mime_type: String,
    /// Base64-encoded image bytes, no data-URI prefix
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Decode the base64 payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(self.data.as_bytes())
    }

    /// File extension matching the MIME type, for saving the result.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Map a file extension to an image MIME type.
///
/// Returns `None` for anything that is not a supported image format.
pub fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Base64-encode raw bytes with the standard alphabet.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
