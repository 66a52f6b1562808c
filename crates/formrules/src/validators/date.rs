//! Calendar-date checks: lower bound and named business rules.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::custom::DateRule;
use crate::foundation::{Validate, ValidationFailure};

// ============================================================================
// MIN DATE
// ============================================================================

/// Lower bound for a date field.
#[derive(Debug, Clone)]
pub enum DateBound {
    /// The clock's current date, read at validation time.
    Today(Arc<dyn Clock>),
    /// A fixed date.
    Fixed(NaiveDate),
}

impl DateBound {
    fn resolve(&self) -> NaiveDate {
        match self {
            DateBound::Today(clock) => clock.today(),
            DateBound::Fixed(date) => *date,
        }
    }
}

/// Validates that a date is not earlier than a bound. The bound itself passes.
#[derive(Debug, Clone)]
pub struct NotBefore {
    bound: DateBound,
    literal: String,
}

impl NotBefore {
    /// Creates the check; `literal` is the rule text used in messages.
    pub fn new(bound: DateBound, literal: impl Into<String>) -> Self {
        Self {
            bound,
            literal: literal.into(),
        }
    }
}

impl Validate for NotBefore {
    type Input = NaiveDate;

    fn validate(&self, input: &NaiveDate) -> Result<(), ValidationFailure> {
        if *input >= self.bound.resolve() {
            Ok(())
        } else {
            Err(ValidationFailure::min_date(&self.literal))
        }
    }
}

// ============================================================================
// CUSTOM RULE
// ============================================================================

/// Runs a named [`DateRule`].
#[derive(Debug, Clone)]
pub struct CustomDate {
    name: String,
    rule: Arc<dyn DateRule>,
}

impl CustomDate {
    /// Binds `rule` under the name the field rule used.
    pub fn new(name: impl Into<String>, rule: Arc<dyn DateRule>) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

impl Validate for CustomDate {
    type Input = NaiveDate;

    fn validate(&self, input: &NaiveDate) -> Result<(), ValidationFailure> {
        if self.rule.check(*input) {
            Ok(())
        } else {
            Err(ValidationFailure::custom_rule(
                &self.name,
                self.rule.default_message(),
            ))
        }
    }
}
