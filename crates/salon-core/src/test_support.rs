//! Local axum server for exercising reqwest code paths in tests.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The first request the server saw.
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// Answer every request with `status` and a JSON `body`.
///
/// Returns the `/api/generate` URL and a handle that yields the first
/// captured request once it has been served.
pub(crate) async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = StatusCode::from_u16(status).unwrap();
    let body = body.to_string();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, request_body: Bytes| {
            let tx = tx.clone();
            let body = body.clone();
            async move {
                let _ = tx.send(CapturedRequest {
                    method,
                    path: uri.path().to_string(),
                    headers,
                    body: String::from_utf8_lossy(&request_body).into_owned(),
                });
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let captured = tokio::spawn(async move { rx.recv().await.unwrap() });

    (format!("http://{addr}/api/generate"), captured)
}
