//! Principal reduction and coupon step tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondlab_core::types::Date;

/// A scheduled principal reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Payment date the reduction applies to
    pub date: Date,
    /// Fraction of original face written down (e.g. 0.10 = 10%)
    pub fraction: Decimal,
}

impl AmortizationEntry {
    /// Creates a new amortization entry.
    #[must_use]
    pub fn new(date: Date, fraction: Decimal) -> Self {
        Self { date, fraction }
    }
}

/// Total of all reduction fractions.
#[must_use]
pub fn total_fraction(entries: &[AmortizationEntry]) -> Decimal {
    entries.iter().map(|e| e.fraction).sum()
}

/// A coupon rate effective from a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponStep {
    /// First period start date the rate applies to
    pub date: Date,
    /// Annual coupon rate (e.g. 0.05 = 5%)
    pub rate: Decimal,
}

impl CouponStep {
    /// Creates a new coupon step.
    #[must_use]
    pub fn new(date: Date, rate: Decimal) -> Self {
        Self { date, rate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_fraction() {
        let d = Date::from_ymd(2026, 1, 1).unwrap();
        let entries = [
            AmortizationEntry::new(d, dec!(0.10)),
            AmortizationEntry::new(d, dec!(0.25)),
        ];
        assert_eq!(total_fraction(&entries), dec!(0.35));
        assert_eq!(total_fraction(&[]), Decimal::ZERO);
    }
}
