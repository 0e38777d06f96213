//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] contract used by schedule generation and payment rolling
//! - Business day adjustment conventions
//! - Weekend-only, null and explicit-holiday calendars
//!
//! Market holiday tables are not shipped; callers needing one can supply the
//! dates through [`HolidayCalendar`] or implement [`Calendar`] themselves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

mod conventions;

pub use conventions::BusinessDayConvention;

use crate::error::CoreResult;
use crate::types::{Date, Period, TimeUnit};

/// Trait for business day calendars.
///
/// Calendars determine which days are business days for a market. They are
/// queried from pricing code running on any thread, hence `Send + Sync`.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if no business day is found within
    /// a year of `date`.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a period, then adjusts the result.
    ///
    /// Day periods count business days; week, month and year periods move
    /// on the calendar first and are adjusted afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the unadjusted date is out of range or the
    /// adjustment fails.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
    ) -> CoreResult<Date> {
        match period.unit() {
            TimeUnit::Days => self.add_business_days(date, period.length()),
            _ => self.adjust(date.advance(period)?, convention),
        }
    }

    /// Advances a date by a number of business days.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if the calendar has no business days.
    fn add_business_days(&self, date: Date, days: i32) -> CoreResult<Date> {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = conventions::roll(result.add_days(direction), direction, self)?;
            remaining -= 1;
        }

        Ok(result)
    }

    /// Returns the next business day on or after the given date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if none is found within a year.
    fn next_business_day(&self, date: Date) -> CoreResult<Date> {
        conventions::roll(date, 1, self)
    }

    /// Returns the previous business day on or before the given date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if none is found within a year.
    fn previous_business_day(&self, date: Date) -> CoreResult<Date> {
        conventions::roll(date, -1, self)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A calendar where every day is a business day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Weekends plus an explicit list of holiday dates.
///
/// ```rust
/// use bondlab_core::calendars::{Calendar, HolidayCalendar};
/// use bondlab_core::types::Date;
///
/// let new_year = Date::from_ymd(2025, 1, 1).unwrap();
/// let cal = HolidayCalendar::new("Desk", [new_year]);
/// assert!(!cal.is_business_day(new_year));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Adds a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Returns the number of explicit holidays.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
