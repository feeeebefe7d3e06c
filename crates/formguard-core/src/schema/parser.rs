//! Schema parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::ValidatorConfig;
use crate::types::{RuleKind, HAS_ERROR_KEY};

use super::document;

/// Errors that can occur when loading schemas.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Schema document is invalid: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),

    #[error("Field name is reserved: {0}")]
    ReservedField(String),

    #[error("Field name must not be empty")]
    EmptyFieldName,
}

/// A form schema: which rule validates which field.
///
/// Built once per form definition and never mutated during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Field name to rule
    pub fields: BTreeMap<String, RuleKind>,

    /// Validator settings carried by the document
    #[serde(default)]
    pub options: ValidatorConfig,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule (builder style).
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<RuleKind>) -> Self {
        self.insert(name, rule);
        self
    }

    /// Set the validator options carried by this schema.
    pub fn with_options(mut self, options: ValidatorConfig) -> Self {
        self.options = options;
        self
    }

    /// Set the rule for a field, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        rule: impl Into<RuleKind>,
    ) -> Option<RuleKind> {
        self.fields.insert(name.into(), rule.into())
    }

    pub fn get(&self, name: &str) -> Option<&RuleKind> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleKind)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let raw: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(raw)
    }

    /// Parse a schema from JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(raw)
    }

    /// Parse a schema from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a schema from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Build a schema from an already-decoded document.
    ///
    /// Accepts both a flat `field: rule` mapping and the
    /// `{ fields, options }` document form.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, SchemaError> {
        let doc = document::normalize(raw);
        document::validate_document(&doc).map_err(SchemaError::InvalidDocument)?;

        let schema: Schema = serde_json::from_value(doc)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Validate field names and report unknown rules.
    fn validate(&self) -> Result<(), SchemaError> {
        for (name, rule) in &self.fields {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }

            if name == HAS_ERROR_KEY {
                return Err(SchemaError::ReservedField(name.clone()));
            }

            if !rule.is_known() {
                tracing::warn!(
                    field = %name,
                    rule = %rule,
                    "Unknown rule, field will be validated for truthiness"
                );
            }
        }

        Ok(())
    }
}

impl<K: Into<String>, R: Into<RuleKind>> FromIterator<(K, R)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, rule) in iter {
            schema.insert(name, rule);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CnpjPolicy, KeyBinding};

    const FLAT_SCHEMA: &str = r#"
cpf: cpf
cnpj: cnpj
email: email
requiredField: required
confirmPassword: confirm_password
terms: toBeTrue
"#;

    #[test]
    fn test_parse_flat_yaml() {
        let schema = Schema::from_yaml(FLAT_SCHEMA).unwrap();
        assert_eq!(schema.len(), 6);
        assert_eq!(schema.get("cpf"), Some(&RuleKind::Cpf));
        assert_eq!(schema.get("confirmPassword"), Some(&RuleKind::ConfirmPassword));
        assert_eq!(schema.get("terms"), Some(&RuleKind::ToBeTrue));
        assert_eq!(schema.options, ValidatorConfig::default());
    }

    #[test]
    fn test_parse_document_with_options() {
        let yaml = r#"
fields:
  company_id: cnpj
options:
  key_binding: field_name
  cnpj_policy: strict
"#;
        let schema = Schema::from_yaml(yaml).unwrap();
        assert_eq!(schema.get("company_id"), Some(&RuleKind::Cnpj));
        assert_eq!(schema.options.key_binding, KeyBinding::FieldName);
        assert_eq!(schema.options.cnpj_policy, CnpjPolicy::Strict);
    }

    #[test]
    fn test_parse_json() {
        let schema = Schema::from_json(r#"{"x": "bogus", "email": "email"}"#).unwrap();
        assert_eq!(schema.get("x"), Some(&RuleKind::Unknown("bogus".to_string())));
        assert_eq!(schema.get("email"), Some(&RuleKind::Email));
    }

    #[test]
    fn test_empty_mapping_is_empty_schema() {
        let schema = Schema::from_json("{}").unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_reserved_field_rejected() {
        let result = Schema::from_json(r#"{"hasError": "required"}"#);
        assert!(matches!(result, Err(SchemaError::ReservedField(_))));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let result = Schema::from_json(r#"{"": "required"}"#);
        assert!(matches!(result, Err(SchemaError::EmptyFieldName)));
    }

    #[test]
    fn test_non_string_rule_rejected() {
        let result = Schema::from_yaml("cpf: 12\n");
        assert!(matches!(result, Err(SchemaError::InvalidDocument(_))));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let result = Schema::from_yaml("cpf: [unclosed\n");
        assert!(matches!(result, Err(SchemaError::YamlError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Schema::from_yaml_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(SchemaError::IoError(_))));
    }

    #[test]
    fn test_builder_and_from_iter_agree() {
        let built = Schema::new().field("cpf", "cpf").field("email", RuleKind::Email);
        let collected: Schema = [("cpf", RuleKind::Cpf), ("email", RuleKind::Email)]
            .into_iter()
            .collect();
        assert_eq!(built, collected);
    }
}
