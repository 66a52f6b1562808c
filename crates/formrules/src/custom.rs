//! Named business rules for date fields.
//!
//! A rule's `customRule` attribute is looked up in a [`CustomRuleRegistry`]
//! when the rule is compiled. The registry is assembled once, before any
//! compile, and is read-only afterwards; it ships with the
//! `noWeekendOrHoliday` rule registered against the built-in holiday table.
//!
//! ```rust,ignore
//! use formrules::custom::{CustomRuleRegistry, DateRule};
//!
//! #[derive(Debug)]
//! struct FirstOfMonth;
//!
//! impl DateRule for FirstOfMonth {
//!     fn check(&self, date: NaiveDate) -> bool { date.day() == 1 }
//! }
//!
//! let mut registry = CustomRuleRegistry::default();
//! registry.register("firstOfMonth", FirstOfMonth);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{BusinessCalendar, HolidayCalendar};

/// Identifier of the built-in weekend/holiday exclusion rule.
pub const NO_WEEKEND_OR_HOLIDAY: &str = "noWeekendOrHoliday";

// ============================================================================
// DATE RULE
// ============================================================================

/// A business constraint over a parsed calendar date.
pub trait DateRule: Send + Sync + fmt::Debug {
    /// Returns true if `date` is acceptable.
    fn check(&self, date: NaiveDate) -> bool;

    /// Message used when the rule declares no `errorMessageCustomRule`.
    fn default_message(&self) -> Cow<'static, str> {
        Cow::Borrowed("This date is not allowed")
    }
}

/// Rejects Saturdays, Sundays, and the calendar's holidays.
#[derive(Debug, Clone)]
pub struct NoWeekendOrHoliday {
    calendar: Arc<dyn BusinessCalendar>,
}

impl NoWeekendOrHoliday {
    /// Creates the rule over `calendar`.
    pub fn new(calendar: Arc<dyn BusinessCalendar>) -> Self {
        Self { calendar }
    }
}

impl Default for NoWeekendOrHoliday {
    fn default() -> Self {
        Self::new(HolidayCalendar::us_federal_2025())
    }
}

impl DateRule for NoWeekendOrHoliday {
    fn check(&self, date: NaiveDate) -> bool {
        !self.calendar.is_weekend(date) && !self.calendar.is_holiday(date)
    }

    fn default_message(&self) -> Cow<'static, str> {
        Cow::Borrowed("Date must not fall on a weekend or holiday")
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Named date rules available to the compiler.
#[derive(Clone)]
pub struct CustomRuleRegistry {
    rules: HashMap<String, Arc<dyn DateRule>>,
}

impl CustomRuleRegistry {
    /// Creates a registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in rules bound to `calendar`.
    pub fn with_calendar(calendar: Arc<dyn BusinessCalendar>) -> Self {
        let mut registry = Self::empty();
        registry.register(NO_WEEKEND_OR_HOLIDAY, NoWeekendOrHoliday::new(calendar));
        registry
    }

    /// Registers `rule` under `name`, returning the rule it replaced.
    pub fn register<R>(&mut self, name: impl Into<String>, rule: R) -> Option<Arc<dyn DateRule>>
    where
        R: DateRule + 'static,
    {
        let name = name.into();
        debug!(rule = %name, "registering custom date rule");
        self.rules.insert(name, Arc::new(rule))
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn DateRule>> {
        self.rules.get(name).cloned()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CustomRuleRegistry {
    fn default() -> Self {
        Self::with_calendar(HolidayCalendar::us_federal_2025())
    }
}

impl fmt::Debug for CustomRuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
