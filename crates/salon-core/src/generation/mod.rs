//! Try-on generation through the remote proxy.
//!
//! The [`Orchestrator`] gates each attempt on the access code and the
//! in-flight guard, composes the multi-part request, calls the proxy through
//! a [`ProxyTransport`], and reports exactly one outcome to the [`Presenter`].

pub(crate) mod guard;
pub(crate) mod orchestrator;
pub(crate) mod presenter;
pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod transport;

pub use orchestrator::{Attempt, GenerationResult, Orchestrator, OrchestratorOptions};
pub use presenter::Presenter;
pub use request::{GenerationRequest, INSTRUCTION};
pub use response::ParsedResponse;
pub use transport::{HttpTransport, ProxyResponse, ProxyTransport};
