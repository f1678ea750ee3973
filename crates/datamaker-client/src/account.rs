//! Lookups against the collections stored in the caller's account.
//!
//! Every call fetches the whole collection and scans it client-side; the
//! first entry whose `id` matches wins. Nothing is cached.

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use datamaker_core::{AccountTemplate, Endpoint};

use crate::client::DataMaker;
use crate::errors::{ClientError, ResourceKind, Result};

impl DataMaker {
    /// Fetch a stored template by identifier.
    pub async fn resolve_template(&self, id: &str) -> Result<AccountTemplate> {
        self.resolve(ResourceKind::Template, id).await
    }

    /// Fetch a stored endpoint by identifier.
    pub async fn resolve_endpoint(&self, id: &str) -> Result<Endpoint> {
        self.resolve(ResourceKind::Endpoint, id).await
    }

    pub async fn list_templates(&self) -> Result<Vec<AccountTemplate>> {
        self.list(ResourceKind::Template).await
    }

    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.list(ResourceKind::Endpoint).await
    }

    pub(crate) async fn resolve<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> Result<T> {
        let items = self.fetch_collection(kind).await?;
        info!(event = "account_lookup", kind = %kind, id = %id, scanned = items.len());
        find_first(kind, items, id)
    }

    async fn list<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<Vec<T>> {
        let items = self.fetch_collection(kind).await?;
        items
            .into_iter()
            .map(|item| decode_entry(kind, item))
            .collect()
    }

    async fn fetch_collection(&self, kind: ResourceKind) -> Result<Vec<Value>> {
        let request = self.service_request(Method::GET, kind.collection_path(), None);
        match self.call(request).await? {
            Value::Array(items) => Ok(items),
            other => Err(ClientError::Decode {
                context: format!("{kind} list"),
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

/// First entry whose `id` equals `id`, decoded into `T`.
fn find_first<T: DeserializeOwned>(kind: ResourceKind, items: Vec<Value>, id: &str) -> Result<T> {
    if items.is_empty() {
        return Err(ClientError::EmptyCollection { kind });
    }

    let entry = items
        .into_iter()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
        .ok_or_else(|| ClientError::NotFound {
            kind,
            id: id.to_string(),
        })?;

    decode_entry(kind, entry)
}

fn decode_entry<T: DeserializeOwned>(kind: ResourceKind, entry: Value) -> Result<T> {
    serde_json::from_value(entry).map_err(|err| ClientError::Decode {
        context: kind.to_string(),
        message: err.to_string(),
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_match_wins_on_duplicate_ids() {
        let items = vec![
            json!({"id": "E0", "method": "POST", "url": "https://a.test"}),
            json!({"id": "E1", "method": "POST", "url": "https://first.test"}),
            json!({"id": "E1", "method": "PUT", "url": "https://second.test"}),
        ];
        let endpoint: Endpoint = find_first(ResourceKind::Endpoint, items, "E1").expect("found");
        assert_eq!(endpoint.url, "https://first.test");
    }

    #[test]
    fn empty_collection_is_not_found() {
        let result = find_first::<Endpoint>(ResourceKind::Endpoint, Vec::new(), "E1");
        let err = result.expect_err("empty");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no endpoints found in your account");
    }

    #[test]
    fn non_matching_entries_are_not_decoded() {
        let items = vec![
            json!({"id": "broken", "fields": "not-a-list"}),
            json!({"id": "T1", "name": "people", "fields": []}),
        ];
        let template: AccountTemplate =
            find_first(ResourceKind::Template, items, "T1").expect("found");
        assert_eq!(template.name, "people");
    }

    #[test]
    fn numeric_ids_never_match_string_lookup() {
        let items = vec![json!({"id": 1, "name": "x", "fields": []})];
        let err = find_first::<AccountTemplate>(ResourceKind::Template, items, "1")
            .expect_err("type mismatch");
        assert!(matches!(err, ClientError::NotFound { .. }));
    }
}
