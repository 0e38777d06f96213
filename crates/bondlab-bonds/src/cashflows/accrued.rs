//! Accrued interest calculations for bonds.
//!
//! Accrued interest is taken from the cash flow whose accrual period
//! straddles settlement, using that flow's own rate and notional, so
//! stepped and factored coupons accrue correctly.
//!
//! # Example
//!
//! ```rust
//! use bondlab_bonds::cashflows::AccruedInterestCalculator;
//! use bondlab_core::daycounts::DayCountConvention;
//! use bondlab_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let accrued = AccruedInterestCalculator::standard(
//!     Date::from_ymd(2025, 4, 26).unwrap(), // settlement
//!     Date::from_ymd(2025, 1, 1).unwrap(),  // period start
//!     dec!(0.05),                           // 5% coupon rate
//!     dec!(1000),                           // notional
//!     DayCountConvention::Thirty360BondBasis,
//! );
//! assert_eq!(accrued.round_dp(4), dec!(15.9722));
//! ```

use rust_decimal::Decimal;

use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::Date;

use super::CashFlow;

/// Calculator for accrued interest.
pub struct AccruedInterestCalculator;

impl AccruedInterestCalculator {
    /// Standard accrued interest: `notional * rate * fraction(start, settlement)`.
    #[must_use]
    pub fn standard(
        settlement: Date,
        period_start: Date,
        rate: Decimal,
        notional: Decimal,
        day_count: DayCountConvention,
    ) -> Decimal {
        notional * rate * day_count.year_fraction(period_start, settlement)
    }

    /// Returns the flow accruing at settlement, if any.
    ///
    /// None before the first accrual start and on or after the last accrual
    /// end. On a coupon date the next period is returned, which has accrued
    /// nothing yet.
    #[must_use]
    pub fn current_period(flows: &[CashFlow], settlement: Date) -> Option<&CashFlow> {
        flows.iter().find(|cf| cf.accrues_on(settlement))
    }

    /// Accrued interest in currency for a flow vector at settlement.
    #[must_use]
    pub fn from_cashflows(
        flows: &[CashFlow],
        settlement: Date,
        day_count: DayCountConvention,
    ) -> Decimal {
        Self::current_period(flows, settlement).map_or(Decimal::ZERO, |cf| {
            Self::standard(
                settlement,
                cf.accrual_start(),
                cf.rate(),
                cf.notional(),
                day_count,
            )
        })
    }

    /// Days accrued at settlement under `day_count`; zero outside the bond's
    /// life.
    #[must_use]
    pub fn accrued_days(
        flows: &[CashFlow],
        settlement: Date,
        day_count: DayCountConvention,
    ) -> i64 {
        Self::current_period(flows, settlement)
            .map_or(0, |cf| day_count.day_count(cf.accrual_start(), settlement))
    }
}
