//! The generation lifecycle: gate, compose, call, interpret, report.

use super::guard::{InFlightGuard, LoadingScope};
use super::presenter::Presenter;
use super::request::GenerationRequest;
use super::response::{parse_error_message, remote_failure_message, ParsedResponse};
use super::transport::{HttpTransport, ProxyResponse, ProxyTransport};
use crate::config::{Config, GenerationConfig};
use crate::encoder::{AssetEncoder, AssetSource, LocalAssetEncoder};
use crate::error::GenerationError;
use crate::selection::ReadySelection;
use crate::types::ImagePayload;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one attempt.
pub type GenerationResult = Result<ImagePayload, GenerationError>;

/// What happened when generation was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Another attempt was in flight; this trigger was ignored.
    Busy,
    /// The attempt ran to completion with exactly one result.
    Finished(GenerationResult),
}

/// Settings the orchestrator needs from configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Directory relative style image paths resolve against
    pub asset_dir: PathBuf,
    /// Output image parameters
    pub generation: GenerationConfig,
    /// Limit on a single proxy call
    pub timeout: Duration,
}

impl OrchestratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            asset_dir: config.asset_dir(),
            generation: config.generation.clone(),
            timeout: Duration::from_millis(config.proxy.timeout_ms),
        }
    }
}

/// Runs generation attempts, at most one at a time.
pub struct Orchestrator {
    transport: Arc<dyn ProxyTransport>,
    encoder: Arc<dyn AssetEncoder>,
    presenter: Arc<dyn Presenter>,
    options: OrchestratorOptions,
    in_flight: AtomicBool,
}

impl Orchestrator {
    pub fn new(
        transport: Arc<dyn ProxyTransport>,
        encoder: Arc<dyn AssetEncoder>,
        presenter: Arc<dyn Presenter>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            transport,
            encoder,
            presenter,
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wire up the HTTP transport and local encoder from configuration.
    pub fn from_config(config: &Config, presenter: Arc<dyn Presenter>) -> Self {
        Self::new(
            Arc::new(HttpTransport::new(&config.proxy.endpoint)),
            Arc::new(LocalAssetEncoder::new(config.limits.max_asset_bytes())),
            presenter,
            OrchestratorOptions::from_config(config),
        )
    }

    /// Whether an attempt is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Trigger one generation attempt.
    ///
    /// Returns [`Attempt::Busy`] without side effects if another attempt is
    /// in flight. A missing access code asks the presenter for one and
    /// returns [`GenerationError::MissingCredential`] without touching the
    /// network. Every other attempt shows loading, reports exactly one
    /// result or error, and clears loading. A panic inside the attempt is
    /// reported as [`GenerationError::Unexpected`].
    pub async fn generate(&self, selection: ReadySelection<'_>, access_code: Option<&str>) -> Attempt {
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            tracing::debug!("Generation already in progress, ignoring trigger");
            return Attempt::Busy;
        };

        let Some(access_code) = access_code.map(str::trim).filter(|c| !c.is_empty()) else {
            tracing::info!("No access code stored, prompting for one");
            self.presenter.prompt_credential();
            return Attempt::Finished(Err(GenerationError::MissingCredential));
        };

        let _loading = LoadingScope::show(self.presenter.as_ref());
        let result = AssertUnwindSafe(self.run(selection, access_code))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(GenerationError::Unexpected(panic_message(panic.as_ref())))
            });

        match &result {
            Ok(image) => self.presenter.show_result(image),
            Err(e) => {
                tracing::warn!(kind = e.kind(), "Generation failed: {e}");
                self.presenter.show_error(&e.to_string());
            }
        }
        Attempt::Finished(result)
    }

    async fn run(&self, selection: ReadySelection<'_>, access_code: &str) -> GenerationResult {
        let style = selection.style;
        let source = AssetSource::resolve(&style.image, &self.options.asset_dir);
        let style_data = self.encoder.encode(&source).await?;

        let request = GenerationRequest::compose(
            access_code,
            selection.photo,
            &style_data,
            &self.options.generation,
        );

        tracing::info!(style_id = style.id, "Requesting try-on with style \"{}\"", style.name);
        let start = Instant::now();
        let response = tokio::time::timeout(self.options.timeout, self.transport.post(&request))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_ms: self.options.timeout.as_millis() as u64,
            })??;
        tracing::debug!(
            status = response.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Proxy responded"
        );

        interpret(response)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!("Generation attempt panicked: {detail}");
    format!("Something went wrong while generating: {detail}")
}

/// Turn a raw proxy answer into the attempt's result.
fn interpret(response: ProxyResponse) -> GenerationResult {
    if !response.is_success() {
        let message = parse_error_message(&response.body)
            .unwrap_or_else(|| remote_failure_message(response.status));
        return Err(GenerationError::RemoteCall {
            message,
            status_code: Some(response.status),
        });
    }
    ParsedResponse::parse(&response.body).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionState;
    use crate::types::StyleOption;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    // ── Fakes ───────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Loading(bool),
        Result(ImagePayload),
        Error(String),
        PromptCredential,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingPresenter {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl Presenter for RecordingPresenter {
        fn show_loading(&self, loading: bool) {
            self.push(Event::Loading(loading));
        }
        fn show_result(&self, image: &ImagePayload) {
            self.push(Event::Result(image.clone()));
        }
        fn show_error(&self, message: &str) {
            self.push(Event::Error(message.to_string()));
        }
        fn prompt_credential(&self) {
            self.push(Event::PromptCredential);
        }
    }

    /// Replays canned responses and records each request body.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<ProxyResponse, GenerationError>>>,
        requests: Mutex<Vec<serde_json::Value>>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: &str) -> Self {
            let transport = Self::default();
            transport.responses.lock().unwrap().push_back(Ok(ProxyResponse {
                status,
                body: body.as_bytes().to_vec(),
            }));
            transport
        }

        fn failing(err: GenerationError) -> Self {
            let transport = Self::default();
            transport.responses.lock().unwrap().push_back(Err(err));
            transport
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProxyTransport for ScriptedTransport {
        async fn post(&self, request: &GenerationRequest) -> Result<ProxyResponse, GenerationError> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Unexpected("no scripted response".into())))
        }
    }

    /// Blocks inside `post` until released, to hold the in-flight slot.
    struct GatedTransport {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProxyTransport for GatedTransport {
        async fn post(&self, _request: &GenerationRequest) -> Result<ProxyResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(ProxyResponse {
                status: 200,
                body: image_body("image/png", "ABC="),
            })
        }
    }

    struct PanickingTransport;

    #[async_trait]
    impl ProxyTransport for PanickingTransport {
        async fn post(&self, _request: &GenerationRequest) -> Result<ProxyResponse, GenerationError> {
            panic!("transport blew up");
        }
    }

    struct HangingTransport;

    #[async_trait]
    impl ProxyTransport for HangingTransport {
        async fn post(&self, _request: &GenerationRequest) -> Result<ProxyResponse, GenerationError> {
            std::future::pending().await
        }
    }

    struct FixedEncoder(Result<String, GenerationError>);

    #[async_trait]
    impl AssetEncoder for FixedEncoder {
        async fn encode(&self, _source: &AssetSource) -> Result<String, GenerationError> {
            self.0.clone()
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn image_body(mime: &str, data: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"mimeType": mime, "data": data}}]}}]
        }))
        .unwrap()
    }

    fn options() -> OrchestratorOptions {
        OrchestratorOptions {
            asset_dir: PathBuf::from("/srv/styles"),
            generation: GenerationConfig::default(),
            timeout: Duration::from_secs(5),
        }
    }

    fn orchestrator(
        transport: Arc<dyn ProxyTransport>,
        presenter: Arc<RecordingPresenter>,
    ) -> Orchestrator {
        Orchestrator::new(
            transport,
            Arc::new(FixedEncoder(Ok("U1RZTEU=".to_string()))),
            presenter,
            options(),
        )
    }

    fn complete_selection() -> SelectionState {
        let mut selection = SelectionState::new();
        selection.select_style(StyleOption::new(1, "Hair NO1", "images/NO1.png", "bob"));
        selection.set_customer_photo(PathBuf::from("me.jpg"), "U1VCSkVDVA==".to_string());
        selection
    }

    fn assert_settled(orch: &Orchestrator, presenter: &RecordingPresenter) {
        assert!(!orch.is_generating());
        let events = presenter.events();
        assert_eq!(events.first(), Some(&Event::Loading(true)));
        assert_eq!(events.last(), Some(&Event::Loading(false)));
    }

    // ── Tests ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_success_returns_inline_image() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport {
            responses: Mutex::new(VecDeque::from([Ok(ProxyResponse {
                status: 200,
                body: image_body("image/png", "ABC="),
            })])),
            ..Default::default()
        });
        let orch = orchestrator(transport.clone(), presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code-123")).await;

        let expected = ImagePayload::new("image/png", "ABC=");
        assert_eq!(attempt, Attempt::Finished(Ok(expected.clone())));
        assert_eq!(
            presenter.events(),
            vec![Event::Loading(true), Event::Result(expected), Event::Loading(false)]
        );
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn test_request_carries_code_photo_and_style() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(200, "{}"));
        let orch = orchestrator(transport.clone(), presenter);
        let selection = complete_selection();

        orch.generate(selection.ready().unwrap(), Some("  code-123 ")).await;

        let requests = transport.requests.lock().unwrap();
        let body = &requests[0];
        assert_eq!(body["accessCode"], "code-123");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[1]["inlineData"]["data"], "U1VCSkVDVA==");
        assert_eq!(parts[2]["inlineData"]["data"], "U1RZTEU=");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "2:3");
    }

    #[tokio::test]
    async fn test_missing_code_prompts_without_network() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::default());
        let orch = orchestrator(transport.clone(), presenter.clone());
        let selection = complete_selection();

        for code in [None, Some(""), Some("   ")] {
            let attempt = orch.generate(selection.ready().unwrap(), code).await;
            assert_eq!(
                attempt,
                Attempt::Finished(Err(GenerationError::MissingCredential))
            );
        }

        assert_eq!(transport.calls(), 0);
        assert!(presenter.events().iter().all(|e| *e == Event::PromptCredential));
        assert!(!orch.is_generating());
    }

    #[tokio::test]
    async fn test_text_only_response_is_refusal() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"cannot edit this image"}]}}]}"#,
        ));
        let orch = orchestrator(transport, presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        assert_eq!(
            attempt,
            Attempt::Finished(Err(GenerationError::ContentRefused(
                "cannot edit this image".to_string()
            )))
        );
        assert!(presenter
            .events()
            .contains(&Event::Error("cannot edit this image".to_string())));
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_error_status_uses_body_message() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(
            403,
            r#"{"error":{"message":"bad code"}}"#,
        ));
        let orch = orchestrator(transport, presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("wrong")).await;

        assert_eq!(
            attempt,
            Attempt::Finished(Err(GenerationError::RemoteCall {
                message: "bad code".to_string(),
                status_code: Some(403),
            }))
        );
        assert!(presenter.events().contains(&Event::Error("bad code".to_string())));
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_fallback() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(500, "Internal Server Error"));
        let orch = orchestrator(transport, presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        match attempt {
            Attempt::Finished(Err(GenerationError::RemoteCall {
                message,
                status_code,
            })) => {
                assert!(!message.is_empty());
                assert_eq!(status_code, Some(500));
            }
            other => panic!("expected remote call error, got {other:?}"),
        }
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_no_parts_is_malformed() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(
            200,
            r#"{"candidates":[{"content":{"parts":[{"thought":true}]}}]}"#,
        ));
        let orch = orchestrator(transport, presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        assert!(matches!(
            attempt,
            Attempt::Finished(Err(GenerationError::MalformedResponse(_)))
        ));
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_asset_failure_skips_network() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::replying(200, "{}"));
        let orch = Orchestrator::new(
            transport.clone(),
            Arc::new(FixedEncoder(Err(GenerationError::AssetLoad {
                asset: "/srv/styles/images/NO1.png".to_string(),
                message: "No such file or directory".to_string(),
            }))),
            presenter.clone(),
            options(),
        );
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        assert!(matches!(
            attempt,
            Attempt::Finished(Err(GenerationError::AssetLoad { .. }))
        ));
        assert_eq!(transport.calls(), 0);
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(ScriptedTransport::failing(GenerationError::Unexpected(
            "Proxy request failed: connection refused".to_string(),
        )));
        let orch = orchestrator(transport, presenter.clone());
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        assert!(matches!(
            attempt,
            Attempt::Finished(Err(GenerationError::Unexpected(_)))
        ));
        let errors = presenter
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Error(_)))
            .count();
        assert_eq!(errors, 1);
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_timeout_releases_guard() {
        let presenter = Arc::new(RecordingPresenter::default());
        let orch = Orchestrator::new(
            Arc::new(HangingTransport),
            Arc::new(FixedEncoder(Ok("U1RZTEU=".to_string()))),
            presenter.clone(),
            OrchestratorOptions {
                timeout: Duration::from_millis(20),
                ..options()
            },
        );
        let selection = complete_selection();

        let attempt = orch.generate(selection.ready().unwrap(), Some("code")).await;

        assert_eq!(
            attempt,
            Attempt::Finished(Err(GenerationError::Timeout { timeout_ms: 20 }))
        );
        assert_settled(&orch, &presenter);
    }

    #[tokio::test]
    async fn test_concurrent_trigger_is_ignored() {
        let presenter = Arc::new(RecordingPresenter::default());
        let transport = Arc::new(GatedTransport {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let orch = Arc::new(orchestrator(transport.clone(), presenter.clone()));

        let first = {
            let orch = orch.clone();
            tokio::spawn(async move {
                let selection = complete_selection();
                orch.generate(selection.ready().unwrap(), Some("code")).await
            })
        };

        transport.entered.notified().await;
        assert!(orch.is_generating());

        let selection = complete_selection();
        let second = orch.generate(selection.ready().unwrap(), Some("code")).await;
        assert_eq!(second, Attempt::Busy);

        transport.release.notify_one();
        let first = first.await.unwrap();
        assert!(matches!(first, Attempt::Finished(Ok(_))));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_settled(&orch, &presenter);

        // Once settled, a manual retry goes through again
        let retry = {
            let orch = orch.clone();
            tokio::spawn(async move {
                let selection = complete_selection();
                orch.generate(selection.ready().unwrap(), Some("code")).await
            })
        };
        transport.entered.notified().await;
        transport.release.notify_one();
        assert!(matches!(retry.await.unwrap(), Attempt::Finished(Ok(_))));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panic_in_transport_is_reported_as_unexpected() {
        let presenter = Arc::new(RecordingPresenter::default());
        let orch = Arc::new(orchestrator(Arc::new(PanickingTransport), presenter.clone()));

        let handle = {
            let orch = orch.clone();
            tokio::spawn(async move {
                let selection = complete_selection();
                orch.generate(selection.ready().unwrap(), Some("code")).await
            })
        };

        let attempt = handle.await.expect("panic must not escape generate");
        match attempt {
            Attempt::Finished(Err(GenerationError::Unexpected(message))) => {
                assert!(message.contains("transport blew up"));
            }
            other => panic!("expected unexpected error, got {other:?}"),
        }
        assert_settled(&orch, &presenter);

        let errors: Vec<_> = presenter
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Error(_)))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(!presenter
            .events()
            .iter()
            .any(|e| matches!(e, Event::Result(_))));
    }
}
