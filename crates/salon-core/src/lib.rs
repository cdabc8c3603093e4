//! Salon Core - hairstyle try-on generation library.
//!
//! The user picks a preset hairstyle and supplies a portrait; Salon sends
//! both to an image-generation proxy and returns the composite.
//!
//! # Architecture
//!
//! ```text
//! StyleCatalog ─┐
//! Photo ────────┼→ SelectionState → Orchestrator → ProxyTransport → ParsedResponse → Presenter
//! TokenStore ───┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use salon_core::{Config, Orchestrator, SelectionState, StyleCatalog};
//!
//! let config = Config::load()?;
//! let catalog = StyleCatalog::from_config(&config);
//! let orchestrator = Orchestrator::from_config(&config, presenter);
//!
//! let mut selection = SelectionState::new();
//! selection.select_style(catalog.find(1).unwrap().clone());
//! selection.set_customer_photo(path, encoded);
//!
//! if let Some(ready) = selection.ready() {
//!     let attempt = orchestrator.generate(ready, token_store.get().as_deref()).await;
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod encoder;
pub mod error;
pub mod generation;
pub mod selection;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenient access
pub use catalog::StyleCatalog;
pub use config::Config;
pub use encoder::{load_customer_photo, AssetEncoder, AssetSource, LocalAssetEncoder};
pub use error::{ConfigError, GenerationError, Result, SalonError, StoreError};
pub use generation::{Attempt, GenerationResult, Orchestrator, OrchestratorOptions, Presenter};
pub use selection::{ReadySelection, SelectionState};
pub use token::{AccessTokenStore, FileTokenStore, MemoryTokenStore};
pub use types::{ImagePayload, StyleOption};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
