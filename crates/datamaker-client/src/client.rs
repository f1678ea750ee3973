use std::fmt;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tracing::info;

use datamaker_core::Headers;

use crate::config::{API_KEY_ENV, ClientOptions, redact_headers};
use crate::errors::{ClientError, Result};
use crate::http_transport::ReqwestTransport;
use crate::transport::{HttpRequest, Transport};

/// API client for the DataMaker service.
///
/// Cheap to clone; clones share the same transport.
#[derive(Clone)]
pub struct DataMaker {
    api_key: String,
    base_url: String,
    headers: Headers,
    default_query: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl DataMaker {
    /// Build a client using the `reqwest` transport.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let transport = ReqwestTransport::new(Some(options.timeout()))
            .map_err(|err| ClientError::Configuration(err.to_string()))?;
        Self::with_transport(options, Arc::new(transport))
    }

    /// Build a client that sends every request through `transport`.
    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Result<Self> {
        let api_key = options
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ClientError::Configuration(format!(
                    "the {API_KEY_ENV} environment variable is missing or empty; either provide it, or set api_key in the client options"
                ))
            })?
            .to_string();

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), api_key.clone());
        headers.extend(options.default_headers.clone());

        let base_url = options.base_url().to_string();
        let default_query = options
            .default_query
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        info!(
            event = "client_configured",
            base_url = %base_url,
            timeout_ms = options.timeout().as_millis() as u64,
            max_retries = options.max_retries,
            default_headers = options.default_headers.len()
        );

        Ok(Self {
            api_key,
            base_url,
            headers,
            default_query,
            transport,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every service request.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub(crate) fn service_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Request against the service base URL with default headers and query.
    pub(crate) fn service_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: self.service_url(path),
            headers: self.headers.clone(),
            query: self.default_query.clone(),
            body,
        }
    }

    /// Send one request and return its JSON body, rejecting non-2xx statuses.
    pub(crate) async fn call(&self, request: HttpRequest) -> Result<Value> {
        let method = request.method.clone();
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::Status {
                method,
                url,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }
}

impl fmt::Debug for DataMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataMaker")
            .field("base_url", &self.base_url)
            .field("headers", &redact_headers(&self.headers))
            .field("default_query", &self.default_query)
            .field("transport", &self.transport)
            .finish()
    }
}
