use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Field, FieldSet, FormLayout};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Messages for every violated rule, in field order, plus the offending fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    invalid: BTreeSet<Field>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn invalid_fields(&self) -> &BTreeSet<Field> {
        &self.invalid
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn reject(&mut self, field: Field, message: &str) {
        self.errors.push(message.to_string());
        self.invalid.insert(field);
    }

    /// Appends another result, keeping the order of messages.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.invalid.extend(other.invalid);
    }
}

/// Validates one step's fields. Out-of-range steps and steps without rules pass.
pub fn validate_step(layout: &FormLayout, step: usize, values: &FieldSet) -> ValidationResult {
    let mut result = ValidationResult::default();
    let Some(step) = layout.step(step) else {
        return result;
    };
    for &field in &step.fields {
        if let Some(message) = check_field(field, values.get(field)) {
            result.reject(field, message);
        }
    }
    result
}

/// Returns the message for a violated rule, or `None` when the value is acceptable.
pub fn check_field(field: Field, value: &str) -> Option<&'static str> {
    let violated = match field {
        Field::Name => word_count(value) < 2,
        Field::Birthday => char_len(value) < 10,
        Field::Email => !EMAIL_PATTERN.is_match(value),
        Field::Phone => char_len(value) < 10,
        Field::Address | Field::AddressStreet => word_count(value) < 2,
        Field::AddressCity | Field::AddressState => char_len(value) < 2,
        Field::AddressZip => char_len(value) < 5,
        Field::Ssn | Field::GovtId => char_len(value) < 4,
        // Compares the value as a number, not its digit count.
        Field::AccountNumber => matches!(numeric_value(value), Some(n) if n < 6.0),
        Field::RoutingNumber => char_len(value) != 9,
    };
    violated.then(|| message_for(field))
}

fn message_for(field: Field) -> &'static str {
    match field {
        Field::Name => "Name must be at least 2 words.",
        Field::Birthday => "Invalid date of birth.",
        Field::Email => "Invalid email address.",
        Field::Phone => "Phone number must be at least 10 digits.",
        Field::Address => "Invalid address.",
        Field::AddressStreet => "Invalid street address.",
        Field::AddressCity => "Invalid address city.",
        Field::AddressState => "Address state should be at least 2 letters.",
        Field::AddressZip => "ZIP code should be at least 5 letters.",
        Field::Ssn => "SSN must be at least 4 digits.",
        Field::GovtId => "Photo ID image required.",
        Field::AccountNumber => "Account number must be at least 6 digits.",
        Field::RoutingNumber => "Routing number must be 9 digits.",
    }
}

fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Loose numeric coercion in the manner of a browser's `Number(value)`: blank reads
/// as zero, `0x`/`0o`/`0b` prefixes and `Infinity` are understood, and any other
/// non-numeric text (including `inf` and `nan`) has no value, so it never compares
/// below the threshold.
fn numeric_value(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let Some(prefixed) = trimmed.get(..2) else { break };
        if prefixed.eq_ignore_ascii_case(prefix) {
            return radix_value(&trimmed[2..], radix);
        }
    }

    let unsigned = trimmed.strip_prefix(|c: char| matches!(c, '+' | '-')).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    // Rust also accepts `inf`, `infinity` and `nan` in any case; a browser does not.
    if unsigned.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}
