use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header name to value map.
pub type Headers = BTreeMap<String, String>;

/// Destination endpoint stored in the caller's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_folder_id: Option<String>,
}

/// Caller-supplied destination; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEndpoint {
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

impl CustomEndpoint {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Either the identifier of an account endpoint or an inline endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointRef {
    Id(String),
    Custom(CustomEndpoint),
}

impl From<&str> for EndpointRef {
    fn from(value: &str) -> Self {
        EndpointRef::Id(value.to_string())
    }
}

impl From<String> for EndpointRef {
    fn from(value: String) -> Self {
        EndpointRef::Id(value)
    }
}

impl From<CustomEndpoint> for EndpointRef {
    fn from(value: CustomEndpoint) -> Self {
        EndpointRef::Custom(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn endpoint_ref_accepts_id_or_inline_object() {
        let by_id: EndpointRef = serde_json::from_value(json!("E1")).expect("id");
        assert_eq!(by_id, EndpointRef::Id("E1".to_string()));

        let inline: EndpointRef =
            serde_json::from_value(json!({"url": "https://example.test/hook", "method": "POST"}))
                .expect("inline");
        assert_eq!(
            inline,
            EndpointRef::Custom(CustomEndpoint::new("https://example.test/hook", "POST"))
        );
    }

    #[test]
    fn stored_endpoint_tolerates_missing_metadata() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "id": "E1",
            "method": "PUT",
            "url": "https://example.test/users"
        }))
        .expect("endpoint");
        assert_eq!(endpoint.headers, None);
        assert_eq!(endpoint.name, "");
    }
}
