//! Compiled patterns shared by the rule predicates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Email address: local part, "@", domain, "." and a TLD of two or more
    /// letters. Case-insensitive, anchored on both ends.
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$"
    ).unwrap();
}

/// Check whether the whole string is an email address.
pub fn is_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}
