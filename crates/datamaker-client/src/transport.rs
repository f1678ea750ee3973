use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use thiserror::Error;

use datamaker_core::Headers;

/// A single outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    /// Query pairs appended to `url`.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Status plus parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP status level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Build(String),
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("response from {url} is not valid json: {message}")]
    InvalidBody { url: String, message: String },
}

/// HTTP primitive used by every client operation.
///
/// Implementations must send exactly one request per `send` call and must not
/// retry.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
