//! Numeric bound checks
//!
//! Both bounds are inclusive and compare finite `f64` values; non-finite
//! input never reaches these checks because the number type check rejects it.

use crate::foundation::ValidationFailure;

crate::validator! {
    /// Validates that a number is at least `min`.
    #[derive(Copy, PartialEq)]
    pub MinValue { min: f64 } for f64;
    rule(self, input) { *input >= self.min }
    error(self, input) { ValidationFailure::min_value(self.min) }
    fn min_value(min: f64);
}

crate::validator! {
    /// Validates that a number is at most `max`.
    #[derive(Copy, PartialEq)]
    pub MaxValue { max: f64 } for f64;
    rule(self, input) { *input <= self.max }
    error(self, input) { ValidationFailure::max_value(self.max) }
    fn max_value(max: f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{FailureKind, Validate};

    #[test]
    fn min_value_is_inclusive() {
        let validator = min_value(0.01);
        assert!(validator.validate(&0.01).is_ok());
        assert_eq!(
            validator.validate(&0.0).unwrap_err().kind,
            FailureKind::MinValue
        );
    }

    #[test]
    fn max_value_is_inclusive() {
        let validator = max_value(1_000_000.0);
        assert!(validator.validate(&1_000_000.0).is_ok());

        let err = validator.validate(&1_000_000.01).unwrap_err();
        assert_eq!(err.kind, FailureKind::MaxValue);
        assert_eq!(err.param("maxValue"), Some("1000000"));
    }
}
