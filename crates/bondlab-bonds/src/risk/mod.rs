//! Risk metrics for bonds.
//!
//! All measures are computed from the same outstanding flows the
//! [`PricingEngine`] discounts, per 100 of face:
//! - Duration: Macaulay `sum(t PV) / P`, modified `-P'(y) / P`
//! - Convexity: `P''(y) / P`
//! - DV01: `dirty(y + 1bp) - dirty(y)`, signed

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::instruments::Bond;
use crate::pricing::{
    macaulay_time, pv_at_yield, pv_derivative, pv_second_derivative, PricingEngine,
};
use crate::types::{DurationType, YieldConvention};

/// One basis point.
pub const BASIS_POINT: f64 = 0.0001;

/// Duration, convexity and rate sensitivity calculations.
#[derive(Debug, Clone, Copy)]
pub struct RiskAnalytics<'a> {
    engine: &'a PricingEngine,
}

impl<'a> RiskAnalytics<'a> {
    /// Creates risk analytics over a pricing engine.
    #[must_use]
    pub fn new(engine: &'a PricingEngine) -> Self {
        Self { engine }
    }

    /// Accrued interest in currency at settlement.
    #[must_use]
    pub fn accrued_interest(&self, bond: &Bond) -> Decimal {
        self.engine.accrued_interest(bond)
    }

    /// Days accrued at settlement.
    #[must_use]
    pub fn accrued_days(&self, bond: &Bond) -> i64 {
        self.engine.accrued_days(bond)
    }

    /// Accrued interest per 100 of face.
    #[must_use]
    pub fn accrued_per_100(&self, bond: &Bond) -> f64 {
        self.engine.accrued_per_100(bond)
    }

    /// Macaulay or modified duration in years.
    ///
    /// Modified duration is `-P'/P`, which reduces to `Macaulay / (1 + y/f)`
    /// for compounded yields and to Macaulay for continuous ones.
    #[must_use]
    pub fn duration(
        &self,
        bond: &Bond,
        y: f64,
        conv: &YieldConvention,
        duration_type: DurationType,
    ) -> f64 {
        let flows = self.engine.timed_flows(bond, conv);
        match duration_type {
            DurationType::Macaulay => macaulay_time(&flows, y, conv),
            DurationType::Modified => {
                let price = pv_at_yield(&flows, y, conv);
                if price == 0.0 {
                    0.0
                } else {
                    -pv_derivative(&flows, y, conv) / price
                }
            }
        }
    }

    /// Convexity `P''(y) / P(y)`.
    #[must_use]
    pub fn convexity(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        let flows = self.engine.timed_flows(bond, conv);
        let price = pv_at_yield(&flows, y, conv);
        if price == 0.0 {
            0.0
        } else {
            pv_second_derivative(&flows, y, conv) / price
        }
    }

    /// Change in dirty price per 100 for a one basis point rise in yield.
    ///
    /// Negative for ordinary coupon bonds.
    #[must_use]
    pub fn dv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        let flows = self.engine.timed_flows(bond, conv);
        pv_at_yield(&flows, y + BASIS_POINT, conv) - pv_at_yield(&flows, y, conv)
    }

    /// Same measure as [`RiskAnalytics::dv01`].
    #[must_use]
    pub fn pv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.dv01(bond, y, conv)
    }

    /// DV01 scaled to the bond's face amount.
    #[must_use]
    pub fn dollar_dv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        let face = bond.face_amount().to_f64().unwrap_or(0.0);
        self.dv01(bond, y, conv) * face / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondlab_core::calendars::{BusinessDayConvention, NullCalendar};
    use bondlab_core::daycounts::DayCountConvention;
    use bondlab_core::types::{Compounding, Date, Frequency, Period};
    use rust_decimal_macros::dec;

    use crate::cashflows::{DateGenerationRule, ScheduleGenerator};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn bond(maturity: Date, rate: Decimal) -> Bond {
        let issue = date(2025, 1, 1);
        let schedule = ScheduleGenerator::new(&NullCalendar)
            .generate(
                issue,
                maturity,
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Backward,
            )
            .unwrap();
        Bond::fixed_rate(
            dec!(1000),
            schedule,
            rate,
            DayCountConvention::Thirty360BondBasis,
            issue,
            BusinessDayConvention::Unadjusted,
            &NullCalendar,
        )
        .unwrap()
    }

    fn engine() -> PricingEngine {
        PricingEngine::new(date(2025, 1, 1))
    }

    #[test]
    fn test_zero_coupon_macaulay_is_maturity() {
        let zero = bond(date(2030, 1, 1), Decimal::ZERO);
        let engine = engine();
        let risk = RiskAnalytics::new(&engine);
        let conv = YieldConvention::default();

        assert_relative_eq!(
            risk.duration(&zero, 0.04, &conv, DurationType::Macaulay),
            5.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            risk.duration(&zero, 0.04, &conv, DurationType::Modified),
            5.0 / 1.02,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_modified_duration_by_compounding() {
        let b = bond(date(2035, 1, 1), dec!(0.05));
        let engine = engine();
        let risk = RiskAnalytics::new(&engine);
        let y = 0.05;

        let compounded = YieldConvention::default();
        let mac = risk.duration(&b, y, &compounded, DurationType::Macaulay);
        assert_relative_eq!(
            risk.duration(&b, y, &compounded, DurationType::Modified),
            mac / 1.025,
            max_relative = 1e-12
        );

        let continuous = compounded.with_compounding(Compounding::Continuous);
        assert_relative_eq!(
            risk.duration(&b, y, &continuous, DurationType::Modified),
            risk.duration(&b, y, &continuous, DurationType::Macaulay),
            max_relative = 1e-12
        );

        let annual = compounded.with_frequency(Frequency::Annual);
        assert_relative_eq!(
            risk.duration(&b, y, &annual, DurationType::Modified),
            risk.duration(&b, y, &annual, DurationType::Macaulay) / 1.05,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_convexity_positive() {
        let b = bond(date(2035, 1, 1), dec!(0.05));
        let engine = engine();
        let risk = RiskAnalytics::new(&engine);
        for compounding in [
            Compounding::Simple,
            Compounding::Compounded,
            Compounding::Continuous,
        ] {
            let conv = YieldConvention::default().with_compounding(compounding);
            assert!(risk.convexity(&b, 0.05, &conv) > 0.0);
        }
    }

    #[test]
    fn test_dv01_close_to_duration_estimate() {
        let b = bond(date(2035, 1, 1), dec!(0.05));
        let engine = engine().with_settlement_date_flows(false);
        let risk = RiskAnalytics::new(&engine);
        let conv = YieldConvention::default();
        let y = 0.052;

        let dv01 = risk.dv01(&b, y, &conv);
        let dirty = engine.dirty_price(&b, y, &conv);
        let estimate = risk.duration(&b, y, &conv, DurationType::Modified) * dirty * BASIS_POINT;

        assert!(dv01 < 0.0);
        assert_relative_eq!(-dv01, estimate, max_relative = 1e-3);
        assert_eq!(risk.pv01(&b, y, &conv), dv01);
        assert_relative_eq!(risk.dollar_dv01(&b, y, &conv), dv01 * 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matured_bond_has_no_risk() {
        let b = bond(date(2026, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2026, 6, 1));
        let risk = RiskAnalytics::new(&engine);
        let conv = YieldConvention::default();
        assert_eq!(risk.duration(&b, 0.05, &conv, DurationType::Modified), 0.0);
        assert_eq!(risk.convexity(&b, 0.05, &conv), 0.0);
        assert_eq!(risk.dv01(&b, 0.05, &conv), 0.0);
    }
}
