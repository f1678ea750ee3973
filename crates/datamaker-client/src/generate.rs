use http::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use datamaker_core::{Record, Template, normalize_quantity};

use crate::account::json_kind;
use crate::client::DataMaker;
use crate::errors::{ClientError, ResourceKind, Result};

const GENERATE_PATH: &str = "datamaker";

impl DataMaker {
    /// Generate records from an inline template.
    ///
    /// A missing or zero quantity is sent as 1. `template` itself is left
    /// untouched.
    pub async fn generate(&self, template: &Template) -> Result<Vec<Record>> {
        let template = template.normalized();
        info!(
            event = "generation_requested",
            source = "inline",
            fields = template.fields.len(),
            quantity = template.normalized_quantity()
        );
        self.post_generation(&template).await
    }

    /// Generate records from an untyped JSON template.
    ///
    /// `null` is rejected as a missing template; anything else must parse
    /// through the field catalogue before a request is issued.
    pub async fn generate_value(&self, template: &Value) -> Result<Vec<Record>> {
        if template.is_null() {
            return Err(ClientError::InvalidArgument(
                "you must provide a template to generate data".to_string(),
            ));
        }
        if !template.is_object() {
            return Err(ClientError::InvalidArgument(format!(
                "template must be a JSON object, got {}",
                json_kind(template)
            )));
        }

        let template: Template = serde_json::from_value(template.clone())
            .map_err(|err| ClientError::InvalidArgument(format!("invalid template: {err}")))?;
        self.generate(&template).await
    }

    /// Generate records from a template stored in the account.
    ///
    /// The matched entry is re-sent verbatim, keys this client does not model
    /// included, with only `quantity` replaced (normalized like
    /// [`DataMaker::generate`]). Option shapes of stored templates are left to
    /// the service.
    pub async fn generate_from_template_id(
        &self,
        template_id: &str,
        quantity: Option<u32>,
    ) -> Result<Vec<Record>> {
        let stored: Value = self.resolve(ResourceKind::Template, template_id).await?;
        let mut request = match stored {
            Value::Object(entry) => entry,
            other => {
                return Err(ClientError::Decode {
                    context: ResourceKind::Template.to_string(),
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                });
            }
        };
        let quantity = normalize_quantity(quantity);
        request.insert("quantity".to_string(), Value::from(quantity));
        let fields = request
            .get("fields")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!(
            event = "generation_requested",
            source = "account",
            template_id = %template_id,
            fields = fields,
            quantity = quantity
        );
        self.post_generation(&request).await
    }

    async fn post_generation<T: Serialize>(&self, body: &T) -> Result<Vec<Record>> {
        let body = serde_json::to_value(body)?;
        let request = self.service_request(Method::POST, GENERATE_PATH, Some(body));
        let response = self.call(request).await?;
        let records: Vec<Record> =
            serde_json::from_value(response).map_err(|err| ClientError::Decode {
                context: "generated records".to_string(),
                message: err.to_string(),
            })?;
        info!(event = "generation_finished", records = records.len());
        Ok(records)
    }
}
