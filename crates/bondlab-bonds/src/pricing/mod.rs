//! Bond pricing calculations.
//!
//! This module provides:
//! - [`PricingEngine`]: Yield to price, price to yield and yield to worst
//!   for a fixed settlement date
//! - [`YieldSolver`]: Hybrid Newton/bisection yield solver
//! - Discounting kernels shared with the risk calculations
//!
//! Prices are quoted per 100 of face in `f64`.

mod yield_solver;

pub use yield_solver::{
    discount_factor, macaulay_time, pv_at_yield, pv_derivative, pv_second_derivative,
    YieldResult, YieldSolver, YIELD_BRACKET,
};

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use bondlab_core::types::Date;

use crate::cashflows::{AccruedInterestCalculator, CashFlow};
use crate::error::{BondError, BondResult};
use crate::instruments::Bond;
use crate::types::{ExercisePoint, YieldConvention};

/// Prices bonds as of a settlement date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    settlement: Date,
    include_settlement_date_flows: bool,
    solver: YieldSolver,
}

impl PricingEngine {
    /// Creates an engine that counts flows paid on the settlement date.
    #[must_use]
    pub fn new(settlement: Date) -> Self {
        Self {
            settlement,
            include_settlement_date_flows: true,
            solver: YieldSolver::new(),
        }
    }

    /// Sets whether a flow paid on the settlement date is still priced.
    #[must_use]
    pub fn with_settlement_date_flows(mut self, include: bool) -> Self {
        self.include_settlement_date_flows = include;
        self
    }

    /// Sets the yield solver.
    #[must_use]
    pub fn with_solver(mut self, solver: YieldSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Returns the settlement date.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Returns true if flows paid on the settlement date are priced.
    #[must_use]
    pub fn includes_settlement_date_flows(&self) -> bool {
        self.include_settlement_date_flows
    }

    /// Returns true if the flow is still to be received at settlement.
    #[must_use]
    pub fn is_outstanding(&self, cf: &CashFlow) -> bool {
        if self.include_settlement_date_flows {
            cf.payment_date() >= self.settlement
        } else {
            cf.payment_date() > self.settlement
        }
    }

    /// Outstanding flows as `(t, amount per 100)` pairs.
    #[must_use]
    pub fn timed_flows(&self, bond: &Bond, conv: &YieldConvention) -> Vec<(f64, f64)> {
        bond.cashflows()
            .iter()
            .filter(|cf| self.is_outstanding(cf))
            .map(|cf| {
                (
                    self.time_to(cf.payment_date(), conv),
                    per_100(bond, cf.amount()),
                )
            })
            .collect()
    }

    fn time_to(&self, date: Date, conv: &YieldConvention) -> f64 {
        conv.day_count
            .year_fraction(self.settlement, date)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Dirty price per 100 at yield `y`.
    #[must_use]
    pub fn dirty_price(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        pv_at_yield(&self.timed_flows(bond, conv), y, conv)
    }

    /// Clean price per 100 at yield `y`.
    #[must_use]
    pub fn clean_price(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.dirty_price(bond, y, conv) - self.accrued_per_100(bond)
    }

    /// Accrued interest in currency at settlement, under the bond's day count.
    ///
    /// Zero before issue, on a coupon date and on or after maturity.
    #[must_use]
    pub fn accrued_interest(&self, bond: &Bond) -> Decimal {
        if self.settlement < bond.issue_date() {
            return Decimal::ZERO;
        }
        AccruedInterestCalculator::from_cashflows(bond.cashflows(), self.settlement, bond.day_count())
    }

    /// Days accrued at settlement under the bond's day count.
    #[must_use]
    pub fn accrued_days(&self, bond: &Bond) -> i64 {
        if self.settlement < bond.issue_date() {
            return 0;
        }
        AccruedInterestCalculator::accrued_days(bond.cashflows(), self.settlement, bond.day_count())
    }

    /// Accrued interest per 100 of face.
    #[must_use]
    pub fn accrued_per_100(&self, bond: &Bond) -> f64 {
        per_100(bond, self.accrued_interest(bond))
    }

    /// Yield to maturity from a clean price per 100.
    ///
    /// # Errors
    ///
    /// Returns `BondError::YieldNotFound` if the solver fails.
    pub fn yield_from_price(
        &self,
        bond: &Bond,
        clean_price: f64,
        conv: &YieldConvention,
    ) -> BondResult<f64> {
        let target = clean_price + self.accrued_per_100(bond);
        let result = self.solver.solve(&self.timed_flows(bond, conv), target, conv)?;
        debug!(
            "yield {:.8} for clean {clean_price} as of {}",
            result.yield_value, self.settlement
        );
        Ok(result.yield_value)
    }

    /// Yield assuming redemption at an exercise point.
    ///
    /// Flows paid after the exercise date are dropped; the principal still
    /// outstanding on that date is redeemed at the exercise price.
    ///
    /// # Errors
    ///
    /// Returns `BondError::YieldNotFound` if the exercise date is not after
    /// settlement or the solver fails.
    pub fn yield_to_exercise(
        &self,
        bond: &Bond,
        clean_price: f64,
        point: &ExercisePoint,
        conv: &YieldConvention,
    ) -> BondResult<f64> {
        if point.date <= self.settlement {
            return Err(BondError::yield_not_found(format!(
                "exercise date {} is not after settlement {}",
                point.date, self.settlement
            )));
        }

        let mut flows = Vec::new();
        let mut outstanding = Decimal::ZERO;
        for cf in bond.cashflows().iter().filter(|cf| self.is_outstanding(cf)) {
            if cf.payment_date() < point.date {
                flows.push((self.time_to(cf.payment_date(), conv), per_100(bond, cf.amount())));
            } else {
                if cf.payment_date() == point.date {
                    flows.push((self.time_to(point.date, conv), per_100(bond, cf.coupon())));
                }
                outstanding += cf.principal();
            }
        }
        flows.push((
            self.time_to(point.date, conv),
            per_100(bond, outstanding * point.price_fraction()),
        ));

        let target = clean_price + self.accrued_per_100(bond);
        let result = self.solver.solve(&flows, target, conv)?;
        debug!(
            "yield to exercise {} @ {}: {:.8}",
            point.date, point.price, result.yield_value
        );
        Ok(result.yield_value)
    }

    /// Lowest of the yield to maturity and the yields to every issuer call
    /// date after settlement.
    ///
    /// Put dates are the holder's choice and never lower the yield the
    /// holder can lock in, so a puttable bond yields to maturity here.
    ///
    /// # Errors
    ///
    /// Returns `BondError::YieldNotFound` if any of the yields cannot be
    /// solved.
    pub fn yield_to_worst(
        &self,
        bond: &Bond,
        clean_price: f64,
        conv: &YieldConvention,
    ) -> BondResult<f64> {
        let mut worst = self.yield_from_price(bond, clean_price, conv)?;
        if let Some(overlay) = bond.overlay().filter(|o| o.is_call()) {
            for point in overlay.points_after(self.settlement) {
                worst = worst.min(self.yield_to_exercise(bond, clean_price, point, conv)?);
            }
        }
        Ok(worst)
    }
}

fn per_100(bond: &Bond, amount: Decimal) -> f64 {
    (amount / bond.face_amount() * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondlab_core::calendars::{BusinessDayConvention, NullCalendar};
    use bondlab_core::daycounts::DayCountConvention;
    use bondlab_core::types::Period;
    use rust_decimal_macros::dec;

    use crate::cashflows::{DateGenerationRule, ScheduleGenerator};
    use crate::types::ExerciseOverlay;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn bond(issue: Date, maturity: Date, rate: Decimal) -> Bond {
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

    #[test]
    fn test_par_on_coupon_date() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2025, 1, 1)).with_settlement_date_flows(false);
        let conv = YieldConvention::default();

        assert_relative_eq!(engine.clean_price(&bond, 0.05, &conv), 100.0, epsilon = 1e-9);
        assert_relative_eq!(
            engine.yield_from_price(&bond, 100.0, &conv).unwrap(),
            0.05,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_settlement_date_flow_inclusion() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let conv = YieldConvention::default();
        let inclusive = PricingEngine::new(date(2025, 1, 1));
        let exclusive = inclusive.with_settlement_date_flows(false);

        // The coupon paid on the settlement date is worth 2.5 per 100 undiscounted
        assert_relative_eq!(
            inclusive.dirty_price(&bond, 0.05, &conv) - exclusive.dirty_price(&bond, 0.05, &conv),
            2.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_accrued_outside_life() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        assert_eq!(
            PricingEngine::new(date(2021, 6, 1)).accrued_interest(&bond),
            Decimal::ZERO
        );
        assert_eq!(
            PricingEngine::new(date(2032, 1, 1)).accrued_interest(&bond),
            Decimal::ZERO
        );
        assert_eq!(PricingEngine::new(date(2033, 1, 1)).accrued_days(&bond), 0);
    }

    #[test]
    fn test_matured_bond_has_no_yield() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2032, 6, 1));
        let conv = YieldConvention::default();
        assert_eq!(engine.dirty_price(&bond, 0.05, &conv), 0.0);
        assert!(matches!(
            engine.yield_from_price(&bond, 100.0, &conv),
            Err(BondError::YieldNotFound { .. })
        ));
    }

    #[test]
    fn test_yield_to_exercise_at_par_on_coupon_date() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2025, 1, 1)).with_settlement_date_flows(false);
        let conv = YieldConvention::default();
        let point = ExercisePoint::new(date(2027, 1, 1), dec!(100));

        // Priced at par, a par call leaves the yield at the coupon
        let ytc = engine.yield_to_exercise(&bond, 100.0, &point, &conv).unwrap();
        assert_relative_eq!(ytc, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_yield_to_worst_takes_minimum() {
        let base = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2025, 1, 1)).with_settlement_date_flows(false);
        let conv = YieldConvention::default();

        // Premium bond callable at par: early call is the worst case
        let callable = base
            .with_overlay(
                ExerciseOverlay::call(vec![
                    ExercisePoint::new(date(2024, 1, 1), dec!(100)),
                    ExercisePoint::new(date(2027, 1, 1), dec!(100)),
                    ExercisePoint::new(date(2030, 1, 1), dec!(100)),
                ])
                .unwrap(),
            )
            .unwrap();

        let ytm = engine.yield_from_price(&callable, 105.0, &conv).unwrap();
        let ytc = engine
            .yield_to_exercise(
                &callable,
                105.0,
                &ExercisePoint::new(date(2027, 1, 1), dec!(100)),
                &conv,
            )
            .unwrap();
        let ytw = engine.yield_to_worst(&callable, 105.0, &conv).unwrap();

        assert!(ytc < ytm);
        assert_relative_eq!(ytw, ytc, epsilon = 1e-12);

        // Without an overlay the worst yield is the yield to maturity
        assert_relative_eq!(
            engine.yield_to_worst(&base, 105.0, &conv).unwrap(),
            ytm,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_yield_to_worst_ignores_puts() {
        let base = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2025, 1, 1)).with_settlement_date_flows(false);
        let conv = YieldConvention::default();
        let put = ExercisePoint::new(date(2027, 1, 1), dec!(100));
        let puttable = base
            .with_overlay(ExerciseOverlay::put(vec![put]).unwrap())
            .unwrap();

        // At a premium the put date yields less than maturity, but the
        // holder is not forced to exercise
        let ytm = engine.yield_from_price(&puttable, 105.0, &conv).unwrap();
        let ytp = engine.yield_to_exercise(&puttable, 105.0, &put, &conv).unwrap();
        assert!(ytp < ytm);
        assert_eq!(engine.yield_to_worst(&puttable, 105.0, &conv).unwrap(), ytm);
    }

    #[test]
    fn test_exercise_before_settlement_rejected() {
        let bond = bond(date(2022, 1, 1), date(2032, 1, 1), dec!(0.05));
        let engine = PricingEngine::new(date(2025, 4, 26));
        let point = ExercisePoint::new(date(2025, 1, 1), dec!(100));
        assert!(engine
            .yield_to_exercise(&bond, 100.0, &point, &YieldConvention::default())
            .is_err());
    }
}
