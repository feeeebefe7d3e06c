//! Structural validation of schema documents.
//!
//! Documents are checked against schemas/form-schema.schema.json before they
//! are deserialized, so malformed documents are reported with the offending
//! location instead of a serde message.

use std::sync::OnceLock;

/// Embedded document schema (loaded at compile time).
const FORM_SCHEMA_JSON: &str = include_str!("../../../../schemas/form-schema.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn get_validator() -> Result<&'static jsonschema::Validator, String> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(FORM_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    result.as_ref().map_err(|e| e.clone())
}

/// Turn a flat `field: rule` mapping into the `{ fields: ... }` document form.
///
/// A top-level `fields` key holding an object marks the document form;
/// anything else is taken as a flat mapping.
pub fn normalize(document: serde_json::Value) -> serde_json::Value {
    match document {
        serde_json::Value::Object(map)
            if map.get("fields").is_some_and(serde_json::Value::is_object) =>
        {
            serde_json::Value::Object(map)
        }
        other => serde_json::json!({ "fields": other }),
    }
}

/// Validate a normalized document.
///
/// Returns every violation, formatted as `"<message> at <path>"`.
pub fn validate_document(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
