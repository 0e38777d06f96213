//! 30/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn thirty360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let y1 = start.year() as i64;
    let y2 = end.year() as i64;
    let m1 = start.month() as i64;
    let m2 = end.month() as i64;

    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

// =============================================================================
// 30/360 Bond Basis
// =============================================================================

/// 30/360 Bond Basis day count convention.
///
/// Also known as "30/360", "30/360 ISDA" or "Bond Basis" (ISDA 2006 4.16(f)).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 AND D1 is now 30, change D2 to 30
///
/// There is no February end-of-month rule.
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360BondBasis;

impl DayCount for Thirty360BondBasis {
    fn name(&self) -> &'static str {
        "30/360 BOND BASIS"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        thirty360_days(start, end, d1, d2)
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 day count convention (Eurobond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
///
/// Each date is adjusted on its own, which makes the convention additive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360European;

impl DayCount for Thirty360European {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = (start.day() as i64).min(30);
        let d2 = (end.day() as i64).min(30);

        thirty360_days(start, end, d1, d2)
    }
}
