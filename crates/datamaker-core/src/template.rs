use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DEFAULT_QUANTITY;
use crate::fields::{Field, FieldKind};

/// One generated entity, keyed by the field names of its template.
pub type Record = Map<String, Value>;

/// Ordered list of fields plus the number of records to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Template {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            name: None,
            fields,
            quantity: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Quantity sent to the service: absent or zero becomes 1.
    pub fn normalized_quantity(&self) -> u32 {
        normalize_quantity(self.quantity)
    }

    /// Copy of the template with its quantity normalized.
    pub fn normalized(&self) -> Self {
        Self {
            quantity: Some(self.normalized_quantity()),
            ..self.clone()
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Non-fatal issues the service may still accept.
    pub fn lint(&self) -> Vec<TemplateWarning> {
        lint_fields(&self.fields)
    }
}

/// Record count actually requested for `quantity`: absent or zero becomes 1.
pub fn normalize_quantity(quantity: Option<u32>) -> u32 {
    match quantity {
        Some(quantity) if quantity > 0 => quantity,
        _ => DEFAULT_QUANTITY,
    }
}

/// Template stored in the caller's account. Read-only on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub template_folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default)]
    pub seed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Server-side keys this client does not model, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountTemplate {
    /// Copy carrying `quantity`; `self` keeps its original value.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..self.clone()
        }
    }

    /// Inline template with the same fields and name.
    pub fn to_template(&self) -> Template {
        Template {
            name: Some(self.name.clone()),
            fields: self.fields.clone(),
            quantity: self.quantity,
        }
    }
}

/// Warning produced by [`Template::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateWarning {
    /// Two fields share a name; the later one overwrites the earlier in each record.
    DuplicateName(String),
    /// A `Derived` or `Mapped` field refers to a name no field defines.
    UnknownReference { field: String, reference: String },
}

impl std::fmt::Display for TemplateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateWarning::DuplicateName(name) => write!(f, "duplicate field name: {name}"),
            TemplateWarning::UnknownReference { field, reference } => {
                write!(f, "field '{field}' references unknown field '{reference}'")
            }
        }
    }
}

fn lint_fields(fields: &[Field]) -> Vec<TemplateWarning> {
    let mut warnings = Vec::new();
    let mut names = BTreeSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            warnings.push(TemplateWarning::DuplicateName(field.name.clone()));
        }
    }

    for field in fields {
        let references = match &field.kind {
            FieldKind::Derived(options) => options.placeholders(),
            FieldKind::Mapped(options) => vec![options.field.as_str()],
            _ => Vec::new(),
        };
        for reference in references {
            if !names.contains(reference) {
                warnings.push(TemplateWarning::UnknownReference {
                    field: field.name.clone(),
                    reference: reference.to_string(),
                });
            }
        }
    }

    warnings
}
