//! Owned form state.
//!
//! A [`Form`] holds the value bag for one form instance together with its
//! optional schema and the last error report. It is created when the form
//! starts, passed by reference to whoever edits or submits it, and dropped
//! when the form ends. There is no shared or global form state.

use crate::engine::Validator;
use crate::report::ErrorReport;
use crate::schema::Schema;
use crate::types::{RawValue, ValueBag};

/// Result of [`Form::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Validation passed (or no schema was set); holds the callback's result.
    Accepted(T),

    /// Validation failed; the callback was not called.
    Rejected(ErrorReport),
}

impl<T> Submission<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Submission::Rejected(_))
    }
}

/// State of a single form instance.
#[derive(Debug, Clone, Default)]
pub struct Form {
    schema: Option<Schema>,
    values: ValueBag,
    errors: ErrorReport,
}

impl Form {
    /// Create a form. Without a schema, submissions skip validation.
    pub fn new(schema: Option<Schema>) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }

    /// Create a form seeded with initial values.
    pub fn with_values<I, K>(schema: Option<Schema>, initial: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        let mut form = Self::new(schema);
        form.extend(initial);
        form
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn set_schema(&mut self, schema: Option<Schema>) {
        self.schema = schema;
    }

    /// Store a field value, returning the previous one.
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<RawValue>,
    ) -> Option<RawValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Store several field values.
    pub fn extend<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        self.values
            .extend(values.into_iter().map(|(name, value)| (name.into(), value)));
    }

    pub fn value(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.values.remove(name)
    }

    /// The current value bag.
    pub fn values(&self) -> &ValueBag {
        &self.values
    }

    /// The current values decoded into a caller type.
    pub fn values_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let map: serde_json::Map<String, RawValue> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        serde_json::from_value(RawValue::Object(map))
    }

    /// Drop every stored value. The schema and last report are kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The report from the last validation; empty before the first one.
    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    /// Validate the current values against the form's schema and keep the
    /// report. Without a schema the report is empty.
    pub fn validate(&mut self) -> &ErrorReport {
        self.errors = match &self.schema {
            Some(schema) => Validator::for_schema(schema).validate(schema, &self.values),
            None => ErrorReport::empty(),
        };
        &self.errors
    }

    /// Validate, then hand the values to `on_submit` unless a field is invalid.
    pub fn submit<T, F>(&mut self, on_submit: F) -> Submission<T>
    where
        F: FnOnce(&ValueBag) -> T,
    {
        if self.schema.is_some() && self.validate().has_error() {
            tracing::debug!(
                invalid = ?self.errors.invalid_fields().collect::<Vec<_>>(),
                "Submission rejected"
            );
            return Submission::Rejected(self.errors.clone());
        }

        Submission::Accepted(on_submit(&self.values))
    }
}
