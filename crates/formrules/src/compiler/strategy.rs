//! Per-kind checking strategies.
//!
//! Each strategy owns the type check for its kind and the constraint chain
//! that runs on the coerced value. Absence is handled before a strategy runs.

use chrono::NaiveDate;
use serde_json::Value;

use super::config::DEFAULT_DATE_FORMAT;
use crate::combinators::Chain;
use crate::foundation::{Validate, ValidationFailure};

#[derive(Debug)]
pub(crate) enum Strategy {
    Text { chain: Chain<str>, trim: bool },
    Number { chain: Chain<f64> },
    Date { chain: Chain<NaiveDate>, format: String },
    /// No checks beyond presence.
    Presence,
}

impl Strategy {
    /// Type-checks `value` and runs the constraint chain.
    pub(crate) fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        match self {
            Strategy::Text { chain, trim } => {
                let Value::String(text) = value else {
                    return Err(ValidationFailure::type_mismatch("string"));
                };
                let text = if *trim { text.trim() } else { text.as_str() };
                chain.validate(text)
            }
            Strategy::Number { chain } => {
                let number =
                    coerce_number(value).ok_or_else(|| ValidationFailure::type_mismatch("number"))?;
                chain.validate(&number)
            }
            Strategy::Date { chain, format } => {
                let date = coerce_date(value, format)
                    .ok_or_else(|| ValidationFailure::type_mismatch("date"))?;
                chain.validate(&date)
            }
            Strategy::Presence => Ok(()),
        }
    }

    /// Number of constraint checks after the type check.
    pub(crate) fn constraint_count(&self) -> usize {
        match self {
            Strategy::Text { chain, .. } => chain.len(),
            Strategy::Number { chain } => chain.len(),
            Strategy::Date { chain, .. } => chain.len(),
            Strategy::Presence => 0,
        }
    }
}

/// A JSON number, or a string holding one. Non-finite values are rejected.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// A string in `format` naming a real calendar date.
pub(crate) fn coerce_date(value: &Value, format: &str) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date(text, format),
        _ => None,
    }
}

/// Parses `text` with `format`.
///
/// The default format only accepts the fixed-width `YYYY-MM-DD` shape; chrono
/// alone would also take `2025-6-7` or a five-digit year.
pub(crate) fn parse_date(text: &str, format: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if format == DEFAULT_DATE_FORMAT && !is_iso_shaped(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, format).ok()
}

fn is_iso_shaped(text: &str) -> bool {
    text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
