//! HTTP transport to the generation proxy.

use super::request::GenerationRequest;
use crate::error::GenerationError;
use async_trait::async_trait;

/// Raw proxy answer: status plus the unparsed body.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a generation request and returns whatever came back.
///
/// Implementations only fail for transport-level problems; HTTP error
/// statuses are returned as a normal [`ProxyResponse`].
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    async fn post(&self, request: &GenerationRequest) -> Result<ProxyResponse, GenerationError>;
}

/// reqwest-backed transport posting JSON to a fixed endpoint.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ProxyTransport for HttpTransport {
    async fn post(&self, request: &GenerationRequest) -> Result<ProxyResponse, GenerationError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Unexpected(format!("Proxy request failed: {e}")))?;

        let status = resp.status().as_u16();
        tracing::debug!(endpoint = %self.endpoint, status, "Proxy call returned");
        let body = resp
            .bytes()
            .await
            .map_err(|e| GenerationError::Unexpected(format!("Failed to read proxy response: {e}")))?;

        Ok(ProxyResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::test_support::serve_once;
    use axum::http::{header::CONTENT_TYPE, Method};

    fn request() -> GenerationRequest {
        GenerationRequest::compose("code-123", "QUJD", "REVG", &GenerationConfig::default())
    }

    #[tokio::test]
    async fn test_posts_json_and_returns_body() {
        let (url, server) = serve_once(200, r#"{"candidates":[]}"#).await;
        let transport = HttpTransport::new(&url);

        let resp = transport.post(&request()).await.unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, br#"{"candidates":[]}"#.to_vec());

        let captured = server.await.unwrap();
        assert_eq!(captured.method, Method::POST);
        assert_eq!(captured.path, "/api/generate");
        assert_eq!(captured.headers[CONTENT_TYPE], "application/json");
        assert!(captured.body.contains(r#""accessCode":"code-123""#));
        assert!(captured.body.contains(r#""responseModalities":["IMAGE"]"#));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let (url, _server) = serve_once(403, r#"{"error":{"message":"bad code"}}"#).await;
        let transport = HttpTransport::new(&url);

        let resp = transport.post(&request()).await.unwrap();
        assert_eq!(resp.status, 403);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_unexpected() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{addr}/api/generate"));
        let err = transport.post(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Unexpected(_)));
    }
}
