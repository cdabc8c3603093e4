//! Access code persistence.
//!
//! The proxy is gated by an opaque access code. It is stored under a fixed
//! key in a small TOML file so it survives across runs until overwritten.

use crate::error::StoreError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the access code is stored under.
pub const ACCESS_CODE_KEY: &str = "hair_app_access_code";

/// Durable storage for the single access code.
pub trait AccessTokenStore: Send + Sync {
    /// The stored code, if any. Blank values count as absent.
    fn get(&self) -> Option<String>;

    /// Store a new code. Input is trimmed; blank input leaves the store unchanged.
    fn set(&self, token: &str) -> Result<(), StoreError>;
}

/// Token store backed by a TOML file, preserving any other keys and comments.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<toml_edit::DocumentMut, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

impl AccessTokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let doc = match self.read_document() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Ignoring unreadable credentials: {e}");
                return None;
            }
        };
        doc.get(ACCESS_CODE_KEY)
            .and_then(|item| item.as_str())
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from)
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let token = token.trim();
        if token.is_empty() {
            tracing::debug!("Blank access code ignored");
            return Ok(());
        }

        let mut doc = self.read_document()?;
        doc[ACCESS_CODE_KEY] = toml_edit::value(token);

        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, doc.to_string()).map_err(io_err)?;

        tracing::debug!("Access code saved to {:?}", self.path);
        Ok(())
    }
}

/// Process-local token store, for tests and one-off sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.lock() = Some(token.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AccessTokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.lock().clone().filter(|t| !t.trim().is_empty())
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let token = token.trim();
        if !token.is_empty() {
            *self.lock() = Some(token.to_string());
        }
        Ok(())
    }
}

/// Render a code for display, keeping only the last few characters.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
