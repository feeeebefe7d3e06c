//! # formguard-core
//!
//! Deterministic declarative form-field validation engine.
//!
//! A [`Schema`] names one rule per field. [`validate_fields`] runs every rule
//! against a value bag and returns an [`ErrorReport`]: one invalid-flag per
//! schema field plus the aggregate `hasError`.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **Total**: Every schema field gets a flag; malformed values never panic
//! 3. **Stateless**: No memory between calls, safe to call from many threads
//! 4. **Read-only**: The value bag is never mutated
//!
//! ## Example
//!
//! ```rust
//! use formguard_core::{validate_fields, Schema, ValueBag};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("cpf", "cpf")
//!     .field("email", "email")
//!     .field("terms", "toBeTrue");
//!
//! let values: ValueBag = serde_json::from_value(json!({
//!     "cpf": "529.982.247-25",
//!     "email": "ana@example.com",
//!     "terms": false
//! })).unwrap();
//!
//! let report = validate_fields(&schema, &values);
//! assert!(report.has_error());
//! assert_eq!(report.invalid_fields().collect::<Vec<_>>(), vec!["terms"]);
//! ```

pub mod config;
pub mod engine;
pub mod form;
pub mod report;
pub mod rules;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use config::{CnpjPolicy, KeyBinding, ValidatorConfig};
pub use engine::{validate_fields, Validator};
pub use form::{Form, Submission};
pub use report::ErrorReport;
pub use rules::{is_valid_cnpj, is_valid_cpf};
pub use schema::{Schema, SchemaError};
pub use types::{RawValue, RuleKind, ValueBag, HAS_ERROR_KEY};

/// Run a single rule against a single value, outside any schema.
///
/// The value is stored under both the rule's conventional key and `field`,
/// so fixed-key rules see it too. `confirm_password` has no password to
/// compare against and always reports invalid.
pub fn check_value(rule: &RuleKind, value: RawValue) -> bool {
    const FIELD: &str = "value";

    let mut values = ValueBag::new();
    let conventional = match rule {
        RuleKind::Cpf => Some(engine::CPF_KEY),
        RuleKind::Cnpj => Some(engine::CNPJ_KEY),
        RuleKind::ConfirmPassword => Some(engine::CONFIRM_PASSWORD_KEY),
        _ => None,
    };
    if let Some(key) = conventional {
        values.insert(key.to_string(), value.clone());
    }
    values.insert(FIELD.to_string(), value);

    Validator::default().check(FIELD, rule, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_value_dispatch() {
        assert!(!check_value(&RuleKind::Cpf, json!("529.982.247-25")));
        assert!(check_value(&RuleKind::Cpf, json!("123")));
        assert!(!check_value(&RuleKind::Cnpj, json!("21053264000183")));
        assert!(check_value(&RuleKind::Email, json!("nope")));
        assert!(!check_value(&RuleKind::Required, json!("x")));
        assert!(check_value(&RuleKind::Unknown("bogus".into()), json!(false)));
    }

    #[test]
    fn test_basic_evaluation_from_yaml() {
        let schema = Schema::from_yaml(
            r#"
cpf: cpf
cnpj: cnpj
email: email
name: required
"#,
        )
        .unwrap();

        let values: ValueBag = serde_json::from_value(json!({
            "cpf": "529.982.247-25",
            "cnpj": "21.053.264/0001-83",
            "email": "ana@example.com",
            "name": "Ana"
        }))
        .unwrap();

        let report = validate_fields(&schema, &values);
        assert!(!report.has_error());
        assert_eq!(report.len(), 4);
    }
}
