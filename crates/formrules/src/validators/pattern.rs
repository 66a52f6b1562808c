//! Regular-expression check
//!
//! Matching is unanchored search, so rules anchor their own patterns
//! (`^[0-9]{9}$`). A pattern that fails to compile is reported to the caller;
//! the compiler turns that into an `InvalidPattern` diagnostic and skips the
//! check for that field.

use regex::Regex;

use crate::foundation::{Validate, ValidationFailure};

/// Validates that a string matches a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Validate for Pattern {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationFailure> {
        if self.regex.is_match(input) {
            Ok(())
        } else {
            Err(ValidationFailure::pattern(self.regex.as_str()))
        }
    }
}

/// Creates a pattern check.
pub fn pattern(pattern: &str) -> Result<Pattern, regex::Error> {
    Pattern::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::FailureKind;

    #[test]
    fn routing_number_needs_nine_digits() {
        let validator = pattern("^[0-9]{9}$").unwrap();
        assert!(validator.validate("123456789").is_ok());

        let err = validator.validate("12345678").unwrap_err();
        assert_eq!(err.kind, FailureKind::Pattern);
        assert_eq!(err.param("pattern"), Some("^[0-9]{9}$"));
    }

    #[test]
    fn unanchored_pattern_searches() {
        let validator = pattern("[0-9]").unwrap();
        assert!(validator.validate("abc1").is_ok());
        assert!(validator.validate("abc").is_err());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(pattern("^[0-9").is_err());
    }
}
