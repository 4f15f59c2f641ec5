// Fixed-format field validation for the simulation wizards

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static TAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}[0-9]{5}[A-Z]$").unwrap());
static GSTIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap());
static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Pan,
    Tan,
    Gstin,
    Pincode,
    Email,
    Phone,
    /// Any non-empty string.
    Text,
    /// Non-negative decimal number.
    Amount,
}

pub fn is_valid(kind: FieldKind, value: &str) -> bool {
    let value = value.trim();
    match kind {
        FieldKind::Pan => PAN_RE.is_match(value),
        FieldKind::Tan => TAN_RE.is_match(value),
        FieldKind::Gstin => GSTIN_RE.is_match(value),
        FieldKind::Pincode => PINCODE_RE.is_match(value),
        FieldKind::Email => EMAIL_RE.is_match(value),
        FieldKind::Phone => PHONE_RE.is_match(value),
        FieldKind::Text => !value.is_empty(),
        FieldKind::Amount => value.parse::<f64>().map(|v| v >= 0.0).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_format() {
        assert!(is_valid(FieldKind::Pan, "ABCDE1234F"));
        assert!(!is_valid(FieldKind::Pan, "abcde1234f"));
        assert!(!is_valid(FieldKind::Pan, "ABCD1234EF"));
        assert!(!is_valid(FieldKind::Pan, "ABCDE12345"));
    }

    #[test]
    fn tan_format() {
        assert!(is_valid(FieldKind::Tan, "DELA12345B"));
        assert!(!is_valid(FieldKind::Tan, "DELAB1234B"));
    }

    #[test]
    fn gstin_format() {
        assert!(is_valid(FieldKind::Gstin, "27ABCDE1234F1Z5"));
        assert!(!is_valid(FieldKind::Gstin, "27ABCDE1234F1X5"));
    }

    #[test]
    fn pincode_rejects_leading_zero() {
        assert!(is_valid(FieldKind::Pincode, "700001"));
        assert!(!is_valid(FieldKind::Pincode, "070001"));
        assert!(!is_valid(FieldKind::Pincode, "70001"));
    }

    #[test]
    fn phone_is_ten_digit_mobile() {
        assert!(is_valid(FieldKind::Phone, "9876543210"));
        assert!(!is_valid(FieldKind::Phone, "1234567890"));
        assert!(!is_valid(FieldKind::Phone, "98765432100"));
    }

    #[test]
    fn email_and_text_and_amount() {
        assert!(is_valid(FieldKind::Email, "a@b.co"));
        assert!(!is_valid(FieldKind::Email, "a@b"));
        assert!(is_valid(FieldKind::Text, "anything"));
        assert!(!is_valid(FieldKind::Text, "   "));
        assert!(is_valid(FieldKind::Amount, "1234.50"));
        assert!(!is_valid(FieldKind::Amount, "-1"));
        assert!(!is_valid(FieldKind::Amount, "ten"));
    }
}
