use datamaker_core::{FieldError, FieldKind, FieldType, Template};
use serde_json::json;

#[test]
fn basic_template_parses_and_serializes_back() {
    let value = json!({
        "name": "basic template",
        "quantity": 2,
        "fields": [
            {"name": "first_name", "type": "First Name"},
            {"name": "last_name", "type": "Last Name", "options": {"sex": "female"}},
            {
                "name": "email",
                "type": "Derived",
                "options": {"value": "{{first_name}}.{{last_name}}@automators.com"}
            }
        ]
    });

    let template: Template = serde_json::from_value(value.clone()).expect("parse template");
    assert_eq!(template.quantity, Some(2));
    let types: Vec<FieldType> = template.fields.iter().map(|f| f.field_type()).collect();
    assert_eq!(
        types,
        vec![FieldType::FirstName, FieldType::LastName, FieldType::Derived]
    );

    let encoded = serde_json::to_value(&template).expect("serialize template");
    assert_eq!(encoded, value);
}

#[test]
fn composite_fields_keep_their_options() {
    let value = json!({
        "fields": [
            {"name": "orders", "type": "Nested", "options": {"array": true, "quantity": 3}},
            {"name": "country_code", "type": "Mapped", "options": {"field": "country", "map": {"Poland": "PL"}}},
            {"name": "lookup", "type": "DB Response", "options": {"connection": "c1", "sql": "select 1"}},
            {"name": "remote", "type": "API Response", "options": {"endpoint": "E1", "masking": "***"}}
        ]
    });

    let template: Template = serde_json::from_value(value.clone()).expect("parse template");
    assert!(matches!(template.fields[1].kind, FieldKind::Mapped(ref options) if options.map["Poland"] == "PL"));
    assert_eq!(serde_json::to_value(&template).expect("serialize"), value);
}

#[test]
fn template_with_broken_required_option_fails_to_parse() {
    let value = json!({
        "fields": [
            {"name": "bio", "type": "AI", "options": {"promt": "typo"}}
        ]
    });

    let err = serde_json::from_value::<Template>(value).expect_err("must reject");
    assert!(err.to_string().contains("AI"), "unexpected error: {err}");
}

#[test]
fn unknown_field_type_error_names_the_type() {
    let err = FieldKind::from_parts("Hologram", None).expect_err("unknown type");
    assert!(matches!(err, FieldError::UnknownType(ref name) if name == "Hologram"));
    assert_eq!(err.to_string(), "unknown field type: Hologram");
}
