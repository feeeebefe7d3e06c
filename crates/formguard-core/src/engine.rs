//! Validation engine: dispatches schema fields to rule predicates and
//! aggregates the flags into an [`ErrorReport`].
//!
//! Dispatch table:
//!
//! | Rule | Value read (fixed binding) | Value read (field-name binding) |
//! |------|----------------------------|---------------------------------|
//! | `required`, `email`, `toBeTrue`, unknown | own field | own field |
//! | `cpf` | `cpf` | own field |
//! | `cnpj` | `cnpj` | own field |
//! | `confirm_password` | `password` vs `confirm_password` | `password` vs own field |

use std::collections::BTreeMap;

use crate::config::{KeyBinding, ValidatorConfig};
use crate::report::ErrorReport;
use crate::rules;
use crate::schema::Schema;
use crate::types::{RawValue, RuleKind, ValueBag};

/// Conventional value-bag key read by the CPF rule.
pub const CPF_KEY: &str = "cpf";
/// Conventional value-bag key read by the CNPJ rule.
pub const CNPJ_KEY: &str = "cnpj";
/// Key holding the password compared by `confirm_password`.
pub const PASSWORD_KEY: &str = "password";
/// Conventional key holding the password confirmation.
pub const CONFIRM_PASSWORD_KEY: &str = "confirm_password";

/// Stateless validator. Cheap to build, safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// A validator using the options carried by `schema`.
    pub fn for_schema(schema: &Schema) -> Self {
        Self::new(schema.options)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `values` against every field in `schema`.
    ///
    /// Total: every schema field gets exactly one flag and nothing panics.
    /// The value bag is only read.
    pub fn validate(&self, schema: &Schema, values: &ValueBag) -> ErrorReport {
        let flags: BTreeMap<String, bool> = schema
            .iter()
            .map(|(field, rule)| (field.to_string(), self.check(field, rule, values)))
            .collect();

        let report = ErrorReport::from_flags(flags);
        tracing::debug!(
            fields = report.len(),
            has_error = report.has_error(),
            "Validation complete"
        );
        report
    }

    /// Run the rule for a single field. Returns `true` when INVALID.
    pub fn check(&self, field: &str, rule: &RuleKind, values: &ValueBag) -> bool {
        let own = values.get(field);

        let invalid = match rule {
            RuleKind::Required => rules::required(own),
            RuleKind::Email => rules::email(own),
            RuleKind::ToBeTrue => rules::to_be_true(own),
            RuleKind::Cpf => rules::cpf(self.resolve(field, CPF_KEY, values)),
            RuleKind::Cnpj => rules::cnpj(
                self.resolve(field, CNPJ_KEY, values),
                self.config.cnpj_policy,
            ),
            RuleKind::ConfirmPassword => rules::confirm_password(
                values.get(PASSWORD_KEY),
                self.resolve(field, CONFIRM_PASSWORD_KEY, values),
            ),
            RuleKind::Unknown(name) => {
                tracing::debug!(field, rule = %name, "Unknown rule, checking truthiness");
                rules::to_be_true(own)
            }
        };

        tracing::debug!(field, rule = %rule, invalid, "Field checked");
        invalid
    }

    /// Pick the value a fixed-key rule reads.
    fn resolve<'a>(
        &self,
        field: &str,
        fixed_key: &str,
        values: &'a ValueBag,
    ) -> Option<&'a RawValue> {
        match self.config.key_binding {
            KeyBinding::Fixed => values.get(fixed_key),
            KeyBinding::FieldName => values.get(field),
        }
    }
}

/// Validate `values` against `schema` using the schema's own options.
pub fn validate_fields(schema: &Schema, values: &ValueBag) -> ErrorReport {
    Validator::for_schema(schema).validate(schema, values)
}
