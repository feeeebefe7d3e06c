//! Core types shared by the rules, the engine and the form state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw field value as supplied by form glue.
///
/// A key missing from the [`ValueBag`] stands for an undefined value.
pub type RawValue = serde_json::Value;

/// Mapping from field name to raw value.
pub type ValueBag = BTreeMap<String, RawValue>;

/// Reserved report key holding the aggregate flag.
pub const HAS_ERROR_KEY: &str = "hasError";

/// The closed set of validation rules a schema can name.
///
/// Identifiers are case-sensitive. Anything not listed lands in
/// [`RuleKind::Unknown`] and is validated with the truthiness predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleKind {
    /// `"required"`
    Required,
    /// `"email"`
    Email,
    /// `"cpf"`
    Cpf,
    /// `"cnpj"`
    Cnpj,
    /// `"toBeTrue"`
    ToBeTrue,
    /// `"confirm_password"`
    ConfirmPassword,
    /// Any other identifier, kept verbatim.
    Unknown(String),
}

impl RuleKind {
    /// The wire identifier of this rule.
    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Email => "email",
            RuleKind::Cpf => "cpf",
            RuleKind::Cnpj => "cnpj",
            RuleKind::ToBeTrue => "toBeTrue",
            RuleKind::ConfirmPassword => "confirm_password",
            RuleKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RuleKind::Unknown(_))
    }
}

impl From<&str> for RuleKind {
    fn from(value: &str) -> Self {
        match value {
            "required" => RuleKind::Required,
            "email" => RuleKind::Email,
            "cpf" => RuleKind::Cpf,
            "cnpj" => RuleKind::Cnpj,
            "toBeTrue" => RuleKind::ToBeTrue,
            "confirm_password" => RuleKind::ConfirmPassword,
            other => RuleKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for RuleKind {
    fn from(value: String) -> Self {
        match RuleKind::from(value.as_str()) {
            RuleKind::Unknown(_) => RuleKind::Unknown(value),
            known => known,
        }
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
