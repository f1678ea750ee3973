use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use datamaker_core::Headers;

/// Public API origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://public.datamaker.app/api";

/// Environment variable conventionally holding the API key.
pub const API_KEY_ENV: &str = "DATAMAKER_API_KEY";

/// Per-request timeout applied when none is configured (10 minutes).
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Options accepted by [`crate::DataMaker`].
///
/// The API key must be supplied explicitly; the client never reads the
/// process environment.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Accepted for compatibility. Requests are never retried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Layered over `Content-Type` and `Authorization`; caller values win.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub default_headers: Headers,
    /// Appended to every request sent to the service base URL.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub default_query: BTreeMap<String, String>,
}

impl ClientOptions {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_default_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_query.insert(name.into(), value.into());
        self
    }

    /// Configured base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("default_headers", &redact_headers(&self.default_headers))
            .field("default_query", &self.default_query)
            .finish()
    }
}

/// Copy of `headers` with credential-bearing values masked.
pub fn redact_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            if is_sensitive_header(name) {
                (name.clone(), "***".to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "authorization" | "proxy-authorization" | "cookie" | "x-api-key" | "api-key"
    )
}
