use std::fmt;

use http::Method;
use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Account collections the client can look entries up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Template,
    Endpoint,
}

impl ResourceKind {
    pub(crate) fn collection_path(self) -> &'static str {
        match self {
            ResourceKind::Template => "templates",
            ResourceKind::Endpoint => "endpoints",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Template => f.write_str("template"),
            ResourceKind::Endpoint => f.write_str("endpoint"),
        }
    }
}

/// Errors surfaced by client operations. Nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no {kind}s found in your account")]
    EmptyCollection { kind: ResourceKind },
    #[error("{kind} '{id}' not found in your account")]
    NotFound { kind: ResourceKind, id: String },
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("{method} {url} returned status {status}")]
    Status {
        method: Method,
        url: String,
        status: u16,
        body: Value,
    },
    #[error("unexpected response for {context}: {message}")]
    Decode { context: String, message: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Export stopped at `index`; results of earlier records are discarded.
    #[error("export aborted at record {index} of {total}: {source}")]
    ExportAborted {
        index: usize,
        total: usize,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// True for both an unknown identifier and an empty account collection.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound { .. } | ClientError::EmptyCollection { .. }
        )
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
