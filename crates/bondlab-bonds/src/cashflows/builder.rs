//! Cash flow construction from a schedule.
//!
//! [`CashFlowBuilder`] generates level or stepped coupon flows; the
//! associated functions [`CashFlowBuilder::amortize`] and
//! [`CashFlowBuilder::apply_factor`] derive new flow vectors from existing
//! ones without touching their input.
//!
//! # Example
//!
//! ```rust
//! use bondlab_bonds::cashflows::{CashFlowBuilder, Schedule};
//! use bondlab_core::calendars::{BusinessDayConvention, NullCalendar};
//! use bondlab_core::daycounts::DayCountConvention;
//! use bondlab_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let schedule = Schedule::from_dates(vec![
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 7, 1).unwrap(),
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//! ])
//! .unwrap();
//!
//! let flows = CashFlowBuilder::new(
//!     dec!(1000),
//!     &schedule,
//!     DayCountConvention::Thirty360BondBasis,
//!     BusinessDayConvention::Unadjusted,
//!     &NullCalendar,
//! )
//! .level(dec!(0.05))
//! .unwrap();
//!
//! assert_eq!(flows.len(), 2);
//! assert_eq!(flows[1].amount(), dec!(1025));
//! ```

use log::warn;
use rust_decimal::Decimal;

use bondlab_core::calendars::{BusinessDayConvention, Calendar};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::Date;

use super::{CashFlow, CashFlowKind, Schedule};
use crate::error::{BondError, BondResult};
use crate::types::{total_fraction, AmortizationEntry, CouponStep};

/// Builds coupon and principal flows over a schedule.
pub struct CashFlowBuilder<'a> {
    face: Decimal,
    redemption: Decimal,
    schedule: &'a Schedule,
    day_count: DayCountConvention,
    payment_convention: BusinessDayConvention,
    calendar: &'a dyn Calendar,
}

impl<'a> CashFlowBuilder<'a> {
    /// Creates a builder redeeming at 100.
    #[must_use]
    pub fn new(
        face: Decimal,
        schedule: &'a Schedule,
        day_count: DayCountConvention,
        payment_convention: BusinessDayConvention,
        calendar: &'a dyn Calendar,
    ) -> Self {
        Self {
            face,
            redemption: Decimal::ONE_HUNDRED,
            schedule,
            day_count,
            payment_convention,
            calendar,
        }
    }

    /// Sets the redemption price per 100 of face.
    #[must_use]
    pub fn with_redemption(mut self, redemption: Decimal) -> Self {
        self.redemption = redemption;
        self
    }

    /// Level coupon flows: `face * rate * fraction(start, end)` per period,
    /// the final flow also carrying the redemption principal.
    ///
    /// # Errors
    ///
    /// Returns an error if a payment date cannot be adjusted.
    pub fn level(&self, rate: Decimal) -> BondResult<Vec<CashFlow>> {
        self.build(|_| rate)
    }

    /// Stepped coupon flows.
    ///
    /// Each period uses the last listed step whose date is on or before the
    /// period start; periods before the first step pay no coupon.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidStepSchedule` if `steps` is empty or its
    /// dates decrease.
    pub fn stepped(&self, steps: &[CouponStep]) -> BondResult<Vec<CashFlow>> {
        if steps.is_empty() {
            return Err(BondError::invalid_step_schedule("no coupon steps given"));
        }
        if let Some(w) = steps.windows(2).find(|w| w[0].date > w[1].date) {
            return Err(BondError::invalid_step_schedule(format!(
                "step dates out of order: {} then {}",
                w[0].date, w[1].date
            )));
        }

        self.build(|start| {
            steps
                .iter()
                .rev()
                .find(|s| s.date <= start)
                .map_or(Decimal::ZERO, |s| s.rate)
        })
    }

    fn build(&self, rate_for: impl Fn(Date) -> Decimal) -> BondResult<Vec<CashFlow>> {
        let n = self.schedule.num_periods();
        let principal = self.face * self.redemption / Decimal::ONE_HUNDRED;
        let mut flows = Vec::with_capacity(n);

        for (i, (start, end)) in self.schedule.periods().enumerate() {
            let rate = rate_for(start);
            let coupon = self.face * rate * self.day_count.year_fraction(start, end);
            let payment = self.calendar.adjust(end, self.payment_convention)?;
            let principal = if i + 1 == n { principal } else { Decimal::ZERO };

            flows.push(CashFlow::new(
                payment, start, end, coupon, principal, rate, self.face,
            ));
        }

        Ok(flows)
    }

    /// Applies principal reductions to a flow vector.
    ///
    /// Fractions of original face whose date matches a payment date are
    /// summed; the redemption principal becomes `face * (1 - applied)`.
    /// Coupons are left as generated.
    ///
    /// # Errors
    ///
    /// Returns `BondError::OverAmortization` if any fraction is negative or
    /// all fractions together exceed one.
    pub fn amortize(
        flows: &[CashFlow],
        reductions: &[AmortizationEntry],
    ) -> BondResult<Vec<CashFlow>> {
        let total = total_fraction(reductions);
        if total > Decimal::ONE || reductions.iter().any(|r| r.fraction < Decimal::ZERO) {
            return Err(BondError::over_amortization(total));
        }

        let mut applied = Decimal::ZERO;
        for reduction in reductions {
            if flows.iter().any(|cf| cf.payment_date() == reduction.date) {
                applied += reduction.fraction;
            } else {
                warn!(
                    "amortization date {} matches no payment date, ignored",
                    reduction.date
                );
            }
        }

        let Some(redemption_idx) = flows.iter().rposition(|cf| cf.kind().has_principal()) else {
            return Ok(flows.to_vec());
        };

        let remaining = Decimal::ONE - applied;
        Ok(flows
            .iter()
            .enumerate()
            .map(|(i, cf)| {
                if i == redemption_idx {
                    cf.with_principal(cf.principal() * remaining)
                } else {
                    *cf
                }
            })
            .collect())
    }

    /// Scales the coupon portion and accruing notional of every
    /// coupon-bearing flow by a pool factor. Principal is untouched.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if `factor` is outside `[0, 1]`.
    pub fn apply_factor(flows: &[CashFlow], factor: Decimal) -> BondResult<Vec<CashFlow>> {
        if factor < Decimal::ZERO || factor > Decimal::ONE {
            return Err(BondError::invalid_bond(format!(
                "pool factor must lie in [0, 1], got {factor}"
            )));
        }

        Ok(flows
            .iter()
            .map(|cf| match cf.kind() {
                CashFlowKind::Coupon | CashFlowKind::CouponAndPrincipal => cf.scale_coupon(factor),
                CashFlowKind::Principal => *cf,
            })
            .collect())
    }
}
