//! Async client for the DataMaker data-generation service.
//!
//! The client generates synthetic records from inline or account-stored
//! templates and exports records to API endpoints or the database bridge.
//! All network access goes through the [`Transport`] trait; [`ReqwestTransport`]
//! is the default implementation.

pub mod account;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod export;
pub mod generate;
pub mod http_transport;
pub mod transport;

pub use client::DataMaker;
pub use config::{API_KEY_ENV, ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use endpoint::{ResolvedEndpoint, parse_method};
pub use errors::{ClientError, ResourceKind, Result};
pub use export::{DB_EXPORT_PATH, ExportOptions};
pub use http_transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError};
