//! Business calendar: weekends and designated holidays.
//!
//! The built-in reference table holds the observed United States federal
//! holidays for 2025 and nothing else. Dates in any other year are never
//! holidays; [`HolidayCalendar::covered_years`] makes that gap visible to
//! callers, and [`HolidayCalendar::from_dates`] builds a replacement table.
//!
//! Every predicate is a pure function of immutable data. Text input that does
//! not parse to a real calendar date answers `false` rather than failing.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{Datelike, NaiveDate, Weekday};

/// Observed US federal holidays, 2025.
const US_FEDERAL_2025: [(i32, u32, u32); 11] = [
    (2025, 1, 1),   // New Year's Day
    (2025, 1, 20),  // Birthday of Martin Luther King, Jr.
    (2025, 2, 17),  // Washington's Birthday
    (2025, 5, 26),  // Memorial Day
    (2025, 6, 19),  // Juneteenth
    (2025, 7, 4),   // Independence Day
    (2025, 9, 1),   // Labor Day
    (2025, 10, 13), // Columbus Day
    (2025, 11, 11), // Veterans Day
    (2025, 11, 27), // Thanksgiving Day
    (2025, 12, 25), // Christmas Day
];

static US_FEDERAL: LazyLock<Arc<HolidayCalendar>> = LazyLock::new(|| {
    Arc::new(HolidayCalendar::from_dates(
        "us-federal-2025",
        US_FEDERAL_2025
            .iter()
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
    ))
});

// ============================================================================
// CALENDAR TRAIT
// ============================================================================

/// Answers weekend and holiday questions for a calendar date.
pub trait BusinessCalendar: Send + Sync + fmt::Debug {
    /// True iff `date` is a Saturday or Sunday.
    fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// True iff `date` is a designated holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// Text form of [`is_weekend`](Self::is_weekend); unparsable input is `false`.
    fn is_weekend_str(&self, date: &str) -> bool {
        parse_calendar_date(date).is_some_and(|d| self.is_weekend(d))
    }

    /// Text form of [`is_holiday`](Self::is_holiday); unparsable input is `false`.
    fn is_holiday_str(&self, date: &str) -> bool {
        parse_calendar_date(date).is_some_and(|d| self.is_holiday(d))
    }
}

/// Parses the calendar-date component of `YYYY-MM-DD[...]`.
///
/// Anything after the first ten characters (a `T10:00:00` time part, say) is
/// ignored.
#[must_use]
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let date_part = input.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ============================================================================
// HOLIDAY TABLE
// ============================================================================

/// An immutable set of holiday dates for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    name: Cow<'static, str>,
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Builds a calendar from an explicit list of holidays.
    pub fn from_dates(
        name: impl Into<Cow<'static, str>>,
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// The built-in US federal 2025 table, shared process-wide.
    #[must_use]
    pub fn us_federal_2025() -> Arc<HolidayCalendar> {
        Arc::clone(&US_FEDERAL)
    }

    /// Calendar name, e.g. `us-federal-2025`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Years that have at least one holiday in the table.
    #[must_use]
    pub fn covered_years(&self) -> BTreeSet<i32> {
        self.holidays.iter().map(Datelike::year).collect()
    }

    /// Holidays in ascending order.
    pub fn holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().copied()
    }
}

impl BusinessCalendar for HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}
