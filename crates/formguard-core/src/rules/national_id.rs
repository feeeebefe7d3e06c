//! Brazilian taxpayer identifier checks.
//!
//! | Rule | Digits | Repeated digits | Malformed input |
//! |------|--------|-----------------|-----------------|
//! | CPF  | 11     | only `00000000000` rejected | invalid |
//! | CNPJ | 14     | per [`CnpjPolicy`] | per [`CnpjPolicy`] |
//!
//! [`CnpjPolicy::Lenient`] accepts repeated digits and malformed input;
//! [`CnpjPolicy::Strict`] flags both.
//!
//! The two rules deliberately disagree on leniency. Existing forms rely on
//! both behaviors, so they are kept apart rather than unified.

use serde_json::Value;

use crate::config::CnpjPolicy;
use crate::types::RawValue;

use super::{is_truthy, number_text};

const CPF_LENGTH: usize = 11;
const CNPJ_LENGTH: usize = 14;
const CPF_ALL_ZEROS: &str = "00000000000";

/// Render a value the way a string conversion would, for digit extraction.
///
/// Arrays are joined with commas; nested `null` renders as nothing.
/// Returns `None` for booleans, objects and `null`.
fn digit_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    Value::Bool(b) => b.to_string(),
                    other => digit_text(other).unwrap_or_default(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

fn digits_of(text: &str) -> Vec<u32> {
    text.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// CPF check digit over `digits`, weighted from `len + 1` down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        remainder => remainder,
    }
}

/// CNPJ check digit over `digits`, weights cycling `len - 7` down to 2 then 9.
fn cnpj_check_digit(digits: &[u32]) -> u32 {
    let mut factor = digits.len() as u32 - 7;
    let mut sum = 0;

    for d in digits {
        sum += d * factor;
        factor -= 1;
        if factor < 2 {
            factor = 9;
        }
    }

    let result = 11 - (sum % 11);
    if result > 9 {
        0
    } else {
        result
    }
}

/// CPF predicate. Returns `true` when the value is INVALID.
///
/// Digits beyond the eleventh are ignored. Only the all-zero sequence is
/// rejected before the checksum; other repeated sequences are left to it.
pub fn cpf(value: Option<&RawValue>) -> bool {
    let text = match value {
        Some(v) => digit_text(v).unwrap_or_else(|| {
            tracing::debug!(value = %v, "CPF value has unsupported type, treating as empty");
            String::new()
        }),
        None => String::new(),
    };

    let cleaned: String = text.chars().filter(char::is_ascii_digit).collect();
    if cleaned == CPF_ALL_ZEROS {
        return true;
    }

    let digits = digits_of(&cleaned);
    if digits.len() < CPF_LENGTH {
        return true;
    }

    if cpf_check_digit(&digits[..9]) != digits[9] {
        return true;
    }

    cpf_check_digit(&digits[..10]) != digits[10]
}

/// CNPJ predicate. Returns `true` when the value is INVALID.
///
/// Under [`CnpjPolicy::Lenient`] only a checksum mismatch is flagged;
/// [`CnpjPolicy::Strict`] also flags input that cannot be checked.
pub fn cnpj(value: Option<&RawValue>, policy: CnpjPolicy) -> bool {
    let unchecked = policy == CnpjPolicy::Strict;

    let value = match value {
        Some(v) if is_truthy(Some(v)) => v,
        _ => return unchecked,
    };

    if !matches!(value, Value::String(_) | Value::Array(_)) && !is_integer(value) {
        tracing::debug!(value = %value, "CNPJ value has unsupported type");
        return unchecked;
    }

    let digits = digit_text(value).map(|t| digits_of(&t)).unwrap_or_default();
    if digits.len() != CNPJ_LENGTH {
        return unchecked;
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return unchecked;
    }

    if cnpj_check_digit(&digits[..12]) != digits[12] {
        return true;
    }

    cnpj_check_digit(&digits[..13]) != digits[13]
}

/// Check whether `value` is a valid CPF (formatting characters allowed).
pub fn is_valid_cpf(value: &str) -> bool {
    !cpf(Some(&Value::String(value.to_string())))
}

/// Check whether `value` is a well-formed CNPJ with correct check digits.
///
/// Uses the strict policy: wrong lengths and repeated digits are rejected.
pub fn is_valid_cnpj(value: &str) -> bool {
    !cnpj(Some(&Value::String(value.to_string())), CnpjPolicy::Strict)
}
