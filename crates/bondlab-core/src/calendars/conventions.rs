//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Longest run of non-business days searched before giving up.
const MAX_ROLL_DAYS: i64 = 366;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,

    /// Move to the nearest business day; ties go forward.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given business day convention.
pub(crate) fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if convention == BusinessDayConvention::Unadjusted || calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        BusinessDayConvention::Unadjusted => Ok(date),

        BusinessDayConvention::Following => roll(date, 1, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = roll(date, 1, calendar)?;
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                roll(date, -1, calendar)
            }
        }

        BusinessDayConvention::Preceding => roll(date, -1, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = roll(date, -1, calendar)?;
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                roll(date, 1, calendar)
            }
        }

        BusinessDayConvention::Nearest => {
            let fwd = roll(date, 1, calendar)?;
            let back = roll(date, -1, calendar)?;

            if date.days_between(&fwd) <= back.days_between(&date) {
                Ok(fwd)
            } else {
                Ok(back)
            }
        }
    }
}

/// Moves `date` one day at a time in `direction` until a business day is hit.
/// Returns `date` unchanged when it already is one.
pub(crate) fn roll<C: Calendar + ?Sized>(
    date: Date,
    direction: i64,
    calendar: &C,
) -> CoreResult<Date> {
    let mut current = date;
    for _ in 0..=MAX_ROLL_DAYS {
        if calendar.is_business_day(current) {
            return Ok(current);
        }
        current = current.add_days(direction);
    }
    Err(CoreError::calendar(format!(
        "no business day within {MAX_ROLL_DAYS} days of {date} in '{}'",
        calendar.name()
    )))
}
