//! Error types for the Salon try-on library.
//!
//! Errors are organized by concern so the CLI can print a clear, actionable
//! message (config problems, token storage, and the generation lifecycle).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Salon operations.
#[derive(Error, Debug)]
pub enum SalonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generation lifecycle errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Access token storage errors
    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from the persisted access token file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the credentials file failed
    #[error("Credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file exists but is not valid TOML
    #[error("Credentials file {path} is not valid TOML: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Failures of a single generation attempt.
///
/// Every variant renders to the one message shown to the user for that attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No access token stored; the caller should prompt for one.
    #[error("No access code set. Enter your access code to continue.")]
    MissingCredential,

    /// The style reference (or customer photo) could not be loaded or encoded
    #[error("Failed to load {asset}: {message}")]
    AssetLoad { asset: String, message: String },

    /// The proxy answered with a non-success status
    #[error("{message}")]
    RemoteCall {
        message: String,
        status_code: Option<u16>,
    },

    /// The model answered with text instead of an image
    #[error("{0}")]
    ContentRefused(String),

    /// The response carried neither an image nor a text part
    #[error("{0}")]
    MalformedResponse(String),

    /// The proxy did not answer in time
    #[error("Generation request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Anything not classified above (connection failures and the like)
    #[error("{0}")]
    Unexpected(String),
}

impl GenerationError {
    /// Short, stable identifier for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "missing_credential",
            GenerationError::AssetLoad { .. } => "asset_load",
            GenerationError::RemoteCall { .. } => "remote_call",
            GenerationError::ContentRefused(_) => "content_refused",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::Timeout { .. } => "timeout",
            GenerationError::Unexpected(_) => "unexpected",
        }
    }
}

/// Convenience type alias for Salon results.
pub type Result<T> = std::result::Result<T, SalonError>;
