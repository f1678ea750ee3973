use http::Method;
use tracing::info;

use datamaker_core::{EndpointRef, Headers};

use crate::client::DataMaker;
use crate::errors::{ClientError, Result};

/// Concrete destination for exported records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
}

impl DataMaker {
    /// Turn an endpoint reference into a concrete destination.
    ///
    /// Header selection differs between the two reference kinds:
    /// - stored endpoint: its headers are used only when the stored map is
    ///   non-empty, otherwise the client defaults;
    /// - inline endpoint: its headers are used whenever present, even empty.
    ///
    /// The selected map replaces the defaults; the two are never merged.
    pub async fn resolve_endpoint_ref(&self, endpoint: &EndpointRef) -> Result<ResolvedEndpoint> {
        let resolved = match endpoint {
            EndpointRef::Id(id) => {
                let stored = self.resolve_endpoint(id).await?;
                let method = parse_method(&stored.method)?;
                let headers = match stored.headers {
                    Some(headers) if !headers.is_empty() => headers,
                    _ => self.headers().clone(),
                };
                ResolvedEndpoint {
                    url: stored.url,
                    method,
                    headers,
                }
            }
            EndpointRef::Custom(custom) => ResolvedEndpoint {
                url: custom.url.clone(),
                method: parse_method(&custom.method)?,
                headers: custom
                    .headers
                    .clone()
                    .unwrap_or_else(|| self.headers().clone()),
            },
        };

        info!(
            event = "endpoint_resolved",
            url = %resolved.url,
            method = %resolved.method,
            stored = matches!(endpoint, EndpointRef::Id(_))
        );

        Ok(resolved)
    }
}

/// Parse an HTTP method name, ignoring case and surrounding whitespace.
pub fn parse_method(value: &str) -> Result<Method> {
    let normalized = value.trim().to_ascii_uppercase();
    Method::from_bytes(normalized.as_bytes())
        .map_err(|_| ClientError::InvalidArgument(format!("invalid http method '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_parse_case_insensitively() {
        assert_eq!(parse_method("post").expect("post"), Method::POST);
        assert_eq!(parse_method(" Put ").expect("put"), Method::PUT);
        assert_eq!(parse_method("PATCH").expect("patch"), Method::PATCH);
    }

    #[test]
    fn empty_or_malformed_methods_are_rejected() {
        assert!(matches!(
            parse_method(""),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_method("PO ST"),
            Err(ClientError::InvalidArgument(_))
        ));
    }
}
