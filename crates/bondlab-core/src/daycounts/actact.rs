//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The period is split at each January 1st. Days falling in a leap year
/// count over 366, all others over 365.
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn forward_fraction(start: Date, end: Date) -> Decimal {
        let start_basis = Decimal::from(start.days_in_year());

        if start.year() == end.year() {
            return Decimal::from(start.days_between(&end)) / start_basis;
        }

        // Days from start to Jan 1 of the following year
        let head = i64::from(start.days_in_year()) - i64::from(start.day_of_year()) + 1;
        // Days from Jan 1 of the end year to end
        let tail = i64::from(end.day_of_year()) - 1;
        let whole_years = i64::from(end.year() - start.year() - 1);

        Decimal::from(head) / start_basis
            + Decimal::from(whole_years)
            + Decimal::from(tail) / Decimal::from(end.days_in_year())
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start <= end {
            Self::forward_fraction(start, end)
        } else {
            -Self::forward_fraction(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
