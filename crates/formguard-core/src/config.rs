//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Which value a rule reads from the value bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyBinding {
    /// `cpf`, `cnpj` and `confirm_password` rules read their conventional
    /// keys (`cpf`, `cnpj`, `password`/`confirm_password`) no matter which
    /// schema field named them. Existing form schemas depend on this.
    /// The `email` rule is the exception: it always reads its own field, so
    /// schemas that expected a fixed `email` key must put the rule on a field
    /// named `email`.
    #[default]
    Fixed,

    /// Every rule reads the value stored under its own schema field.
    /// `confirm_password` compares that value with `password`.
    FieldName,
}

/// How the CNPJ rule treats input it cannot check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CnpjPolicy {
    /// Empty, mistyped, wrong-length and all-equal-digit input passes.
    /// Only a checksum mismatch is flagged.
    #[default]
    Lenient,

    /// Anything that is not a well-formed 14-digit CNPJ with correct check
    /// digits is flagged.
    Strict,
}

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Key resolution for the fixed-key rules
    #[serde(default)]
    pub key_binding: KeyBinding,

    /// CNPJ leniency
    #[serde(default)]
    pub cnpj_policy: CnpjPolicy,
}

impl ValidatorConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_binding(mut self, key_binding: KeyBinding) -> Self {
        self.key_binding = key_binding;
        self
    }

    pub fn with_cnpj_policy(mut self, cnpj_policy: CnpjPolicy) -> Self {
        self.cnpj_policy = cnpj_policy;
        self
    }
}
