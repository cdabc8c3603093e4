//! Presentation signals emitted by the orchestrator.

use crate::types::ImagePayload;

/// Receives UI signals for a generation attempt.
///
/// For every attempt that passes the credential check the orchestrator emits
/// `show_loading(true)`, then exactly one of `show_result` / `show_error`,
/// then `show_loading(false)`.
pub trait Presenter: Send + Sync {
    fn show_loading(&self, loading: bool);

    fn show_result(&self, image: &ImagePayload);

    fn show_error(&self, message: &str);

    /// No access code is stored; ask the user for one.
    fn prompt_credential(&self);
}
