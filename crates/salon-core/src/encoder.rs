//! Asset encoding: turn a local file or URL into a bare base64 payload.
//!
//! Used for both the bundled style references and the customer's own photo.
//! Every failure surfaces as [`GenerationError::AssetLoad`].

use crate::error::GenerationError;
use crate::types::{encode_base64, media_type_for_extension};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    File(PathBuf),
    Url(String),
}

impl AssetSource {
    /// Resolve a style image reference against the asset directory.
    ///
    /// `http(s)://` references become URLs; absolute paths are used as-is;
    /// anything else is joined onto `asset_dir`.
    pub fn resolve(reference: &str, asset_dir: &Path) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return AssetSource::Url(reference.to_string());
        }
        let path = PathBuf::from(shellexpand::tilde(reference).into_owned());
        if path.is_absolute() {
            AssetSource::File(path)
        } else {
            AssetSource::File(asset_dir.join(path))
        }
    }

    fn label(&self) -> String {
        match self {
            AssetSource::File(path) => path.display().to_string(),
            AssetSource::Url(url) => url.clone(),
        }
    }
}

/// Loads an image and returns its bytes base64-encoded, with no data-URI prefix.
#[async_trait]
pub trait AssetEncoder: Send + Sync {
    async fn encode(&self, source: &AssetSource) -> Result<String, GenerationError>;
}

/// Encoder for local files and http(s) URLs with a size cap.
pub struct LocalAssetEncoder {
    client: reqwest::Client,
    max_bytes: u64,
}

impl LocalAssetEncoder {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_bytes,
        }
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, String> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| e.to_string())?;
        if !meta.is_file() {
            return Err("not a regular file".to_string());
        }
        if meta.len() > self.max_bytes {
            return Err(too_large(meta.len(), self.max_bytes));
        }
        tokio::fs::read(path).await.map_err(|e| e.to_string())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        use futures_util::StreamExt;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }
        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(too_large(len, self.max_bytes));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| format!("download interrupted: {e}"))?;
            bytes.extend_from_slice(&chunk);
            if bytes.len() as u64 > self.max_bytes {
                return Err(too_large(bytes.len() as u64, self.max_bytes));
            }
        }
        Ok(bytes)
    }
}

#[async_trait]
impl AssetEncoder for LocalAssetEncoder {
    async fn encode(&self, source: &AssetSource) -> Result<String, GenerationError> {
        let bytes = match source {
            AssetSource::File(path) => self.read_file(path).await,
            AssetSource::Url(url) => self.fetch(url).await,
        }
        .map_err(|message| GenerationError::AssetLoad {
            asset: source.label(),
            message,
        })?;

        if bytes.is_empty() {
            return Err(GenerationError::AssetLoad {
                asset: source.label(),
                message: "file is empty".to_string(),
            });
        }

        tracing::debug!("Encoded {} ({} bytes)", source.label(), bytes.len());
        Ok(encode_base64(&bytes))
    }
}

/// Load and encode the customer's photo.
///
/// Only image files are accepted, judged by extension.
pub async fn load_customer_photo(
    encoder: &dyn AssetEncoder,
    path: &Path,
) -> Result<String, GenerationError> {
    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(media_type_for_extension)
        .is_some();
    if !is_image {
        return Err(GenerationError::AssetLoad {
            asset: path.display().to_string(),
            message: "not a supported image file (jpg, png, webp, gif, heic)".to_string(),
        });
    }
    encoder.encode(&AssetSource::File(path.to_path_buf())).await
}

fn too_large(size: u64, max: u64) -> String {
    format!(
        "too large ({:.1}MB > {:.1}MB)",
        size as f64 / (1024.0 * 1024.0),
        max as f64 / (1024.0 * 1024.0)
    )
}
