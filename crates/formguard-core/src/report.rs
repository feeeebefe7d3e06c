//! Error report: per-field invalid flags plus the `hasError` aggregate.
//!
//! The aggregation rule is fixed: `hasError` is true if and only if at least
//! one field flag is true. Reports are built fresh for every validation call
//! and never merged.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::HAS_ERROR_KEY;

/// Outcome of validating a value bag against a schema.
///
/// Serializes as a flat object: one boolean per field plus `hasError`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    fields: BTreeMap<String, bool>,
    has_error: bool,
}

impl ErrorReport {
    /// Build a report from per-field flags, computing the aggregate.
    pub fn from_flags(fields: BTreeMap<String, bool>) -> Self {
        let has_error = fields.values().any(|invalid| *invalid);
        Self { fields, has_error }
    }

    /// A report for an empty schema.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if any field is invalid.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// The flag for `field`, or `None` if the schema did not name it.
    pub fn get(&self, field: &str) -> Option<bool> {
        self.fields.get(field).copied()
    }

    /// True only for fields that were validated and flagged.
    pub fn is_invalid(&self, field: &str) -> bool {
        self.get(field).unwrap_or(false)
    }

    /// Names of the flagged fields, in sorted order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, invalid)| **invalid)
            .map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &BTreeMap<String, bool> {
        &self.fields
    }

    /// Number of field entries (excluding `hasError`).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ErrorReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A field literally named `hasError` is shadowed by the aggregate.
        let entries: Vec<_> = self
            .fields
            .iter()
            .filter(|(name, _)| name.as_str() != HAS_ERROR_KEY)
            .collect();

        let mut map = serializer.serialize_map(Some(entries.len() + 1))?;
        for (name, invalid) in entries {
            map.serialize_entry(name, invalid)?;
        }
        map.serialize_entry(HAS_ERROR_KEY, &self.has_error)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = BTreeMap::<String, bool>::deserialize(deserializer)?;
        // The aggregate is always recomputed from the field flags.
        fields.remove(HAS_ERROR_KEY);
        Ok(Self::from_flags(fields))
    }
}
