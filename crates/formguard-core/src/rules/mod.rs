//! Rule predicates.
//!
//! Every predicate is a pure function that returns `true` when the value is
//! INVALID. The engine stores that flag as-is in the error report.
//!
//! An absent value is passed as `None`. Predicates never fail: values of an
//! unexpected type degrade to a flag instead of an error.

mod national_id;
mod patterns;

pub use national_id::{cnpj, cpf, is_valid_cnpj, is_valid_cpf};
pub use patterns::{is_email, EMAIL_PATTERN};

use serde_json::{Number, Value};

use crate::types::RawValue;

/// Truthiness of a raw value.
///
/// Falsy: absent, `null`, `false`, zero and the empty string. Everything
/// else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&RawValue>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Strict equality between two raw values.
///
/// Primitives compare by type and value; numbers compare numerically.
/// Arrays and objects have identity semantics, so two of them are never
/// strictly equal.
pub fn strictly_equal(left: Option<&RawValue>, right: Option<&RawValue>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(Value::Null), Some(Value::Null)) => true,
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a == b,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(Value::String(a)), Some(Value::String(b))) => a == b,
        _ => false,
    }
}

pub(crate) fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// `required`: invalid when absent, `null`, or of zero length.
///
/// Only strings and arrays have a length; other present values pass.
pub fn required(value: Option<&RawValue>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// `email`: invalid unless the value is a string shaped like an address.
pub fn email(value: Option<&RawValue>) -> bool {
    match value {
        Some(Value::String(s)) => !is_email(s),
        _ => true,
    }
}

/// `toBeTrue`: invalid unless the value is truthy.
pub fn to_be_true(value: Option<&RawValue>) -> bool {
    !is_truthy(value)
}

/// `confirm_password`: invalid when the two values are not strictly equal.
///
/// No trimming or normalization is applied.
pub fn confirm_password(password: Option<&RawValue>, confirmation: Option<&RawValue>) -> bool {
    !strictly_equal(password, confirmation)
}
