use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport; `timeout` bounds each request end to end.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Build(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
        } = request;

        let mut builder = self.client.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body).map_err(|err| TransportError::Request {
                url: url.clone(),
                message: err.to_string(),
            })?;
            builder = builder.body(bytes);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::Request {
                url: url.clone(),
                message: err.to_string(),
            })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::Request {
                url: url.clone(),
                message: err.to_string(),
            })?;
        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => body,
            // Error pages keep their status; the raw text becomes the body.
            Err(_) if !status.is_success() => {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(err) => {
                return Err(TransportError::InvalidBody {
                    url,
                    message: err.to_string(),
                });
            }
        };
        let status = status.as_u16();

        tracing::debug!(event = "http_response", url = %url, status = status);

        Ok(HttpResponse { status, body })
    }
}
