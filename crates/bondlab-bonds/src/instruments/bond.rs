//! Bond with generated cash flows.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondlab_core::calendars::{BusinessDayConvention, Calendar};
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::Date;

use crate::cashflows::{CashFlow, CashFlowBuilder, Schedule};
use crate::error::{BondError, BondResult};
use crate::types::{AmortizationEntry, CouponStep, ExerciseOverlay};

/// How a bond's cash flows were produced.
///
/// Amortizing and factored structures wrap the variant of the bond they were
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuralVariant {
    /// Constant coupon rate.
    Level {
        /// Annual coupon rate
        rate: Decimal,
    },
    /// Coupon rate stepping on given dates.
    Stepped {
        /// Rate table in date order
        steps: Vec<CouponStep>,
    },
    /// Principal written down on given dates.
    Amortizing {
        /// Variant of the underlying bond
        base: Box<StructuralVariant>,
        /// Reductions as fractions of original face
        reductions: Vec<AmortizationEntry>,
    },
    /// Coupons scaled by a pool factor.
    Factored {
        /// Variant of the underlying bond
        base: Box<StructuralVariant>,
        /// Pool factor in [0, 1]
        factor: Decimal,
    },
}

impl StructuralVariant {
    /// Short name of the outermost structure.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StructuralVariant::Level { .. } => "level",
            StructuralVariant::Stepped { .. } => "stepped",
            StructuralVariant::Amortizing { .. } => "amortizing",
            StructuralVariant::Factored { .. } => "factored",
        }
    }

    /// Returns the coupon-generating variant at the bottom of the chain.
    #[must_use]
    pub fn coupon_source(&self) -> &StructuralVariant {
        match self {
            StructuralVariant::Amortizing { base, .. } | StructuralVariant::Factored { base, .. } => {
                base.coupon_source()
            }
            other => other,
        }
    }
}

/// A bond: terms, schedule and the cash flows generated from them.
///
/// Bonds are immutable; amortized, factored and overlaid versions are new
/// bonds derived from a base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bond {
    face_amount: Decimal,
    schedule: Schedule,
    day_count: DayCountConvention,
    issue_date: Date,
    payment_convention: BusinessDayConvention,
    /// Redemption price per 100 of face
    redemption: Decimal,
    cashflows: Vec<CashFlow>,
    variant: StructuralVariant,
    overlay: Option<ExerciseOverlay>,
}

impl Bond {
    /// Creates a level coupon bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if `face` is not positive, or an
    /// error if a payment date cannot be adjusted.
    pub fn fixed_rate(
        face: Decimal,
        schedule: Schedule,
        rate: Decimal,
        day_count: DayCountConvention,
        issue_date: Date,
        payment_convention: BusinessDayConvention,
        calendar: &dyn Calendar,
    ) -> BondResult<Self> {
        validate_face(face)?;
        let cashflows =
            CashFlowBuilder::new(face, &schedule, day_count, payment_convention, calendar)
                .level(rate)?;

        Self::from_parts(
            face,
            schedule,
            day_count,
            issue_date,
            payment_convention,
            cashflows,
            StructuralVariant::Level { rate },
        )
    }

    /// Creates a stepped coupon bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidStepSchedule` for an empty or unsorted step
    /// table and `BondError::InvalidBond` for a non-positive face.
    pub fn stepped_coupon(
        face: Decimal,
        schedule: Schedule,
        steps: Vec<CouponStep>,
        day_count: DayCountConvention,
        issue_date: Date,
        payment_convention: BusinessDayConvention,
        calendar: &dyn Calendar,
    ) -> BondResult<Self> {
        validate_face(face)?;
        let cashflows =
            CashFlowBuilder::new(face, &schedule, day_count, payment_convention, calendar)
                .stepped(&steps)?;

        Self::from_parts(
            face,
            schedule,
            day_count,
            issue_date,
            payment_convention,
            cashflows,
            StructuralVariant::Stepped { steps },
        )
    }

    /// Derives an amortizing bond from `base`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::OverAmortization` if the reductions are negative
    /// or exceed the original face.
    pub fn amortizing(base: &Bond, reductions: Vec<AmortizationEntry>) -> BondResult<Self> {
        let cashflows = CashFlowBuilder::amortize(&base.cashflows, &reductions)?;
        Ok(base.derive(
            cashflows,
            StructuralVariant::Amortizing {
                base: Box::new(base.variant.clone()),
                reductions,
            },
        ))
    }

    /// Derives a pass-through bond whose coupons are scaled by a pool factor.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if `factor` is outside `[0, 1]`.
    pub fn factored(base: &Bond, factor: Decimal) -> BondResult<Self> {
        let cashflows = CashFlowBuilder::apply_factor(&base.cashflows, factor)?;
        Ok(base.derive(
            cashflows,
            StructuralVariant::Factored {
                base: Box::new(base.variant.clone()),
                factor,
            },
        ))
    }

    /// Returns a copy carrying a put or call schedule.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if an exercise date falls on or
    /// before issue or after maturity.
    pub fn with_overlay(&self, overlay: ExerciseOverlay) -> BondResult<Self> {
        let maturity = self.maturity_date();
        if let Some(p) = overlay
            .points()
            .iter()
            .find(|p| p.date <= self.issue_date || p.date > maturity)
        {
            return Err(BondError::invalid_bond(format!(
                "exercise date {} outside bond life ({}, {}]",
                p.date, self.issue_date, maturity
            )));
        }

        let mut bond = self.clone();
        bond.overlay = Some(overlay);
        Ok(bond)
    }

    fn from_parts(
        face_amount: Decimal,
        schedule: Schedule,
        day_count: DayCountConvention,
        issue_date: Date,
        payment_convention: BusinessDayConvention,
        cashflows: Vec<CashFlow>,
        variant: StructuralVariant,
    ) -> BondResult<Self> {
        if cashflows.is_empty() {
            return Err(BondError::invalid_bond("bond has no cash flows"));
        }

        debug!(
            "created {} bond: face {face_amount}, {} flows, {} to {}",
            variant.name(),
            cashflows.len(),
            schedule.start_date(),
            schedule.maturity_date()
        );

        Ok(Self {
            face_amount,
            schedule,
            day_count,
            issue_date,
            payment_convention,
            redemption: Decimal::ONE_HUNDRED,
            cashflows,
            variant,
            overlay: None,
        })
    }

    fn derive(&self, cashflows: Vec<CashFlow>, variant: StructuralVariant) -> Self {
        debug!("derived {} bond from {} bond", variant.name(), self.variant.name());
        Self {
            cashflows,
            variant,
            ..self.clone()
        }
    }

    /// Returns the face amount.
    #[must_use]
    pub fn face_amount(&self) -> Decimal {
        self.face_amount
    }

    /// Returns the accrual schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the coupon day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date (last schedule date).
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.schedule.maturity_date()
    }

    /// Returns the payment date convention.
    #[must_use]
    pub fn payment_convention(&self) -> BusinessDayConvention {
        self.payment_convention
    }

    /// Returns the redemption price per 100 of face.
    #[must_use]
    pub fn redemption(&self) -> Decimal {
        self.redemption
    }

    /// Returns all cash flows in payment order.
    #[must_use]
    pub fn cashflows(&self) -> &[CashFlow] {
        &self.cashflows
    }

    /// Returns the structural variant.
    #[must_use]
    pub fn variant(&self) -> &StructuralVariant {
        &self.variant
    }

    /// Returns the exercise overlay, if any.
    #[must_use]
    pub fn overlay(&self) -> Option<&ExerciseOverlay> {
        self.overlay.as_ref()
    }

    /// Sum of all principal payments.
    #[must_use]
    pub fn total_principal(&self) -> Decimal {
        self.cashflows.iter().map(CashFlow::principal).sum()
    }
}

fn validate_face(face: Decimal) -> BondResult<()> {
    if face <= Decimal::ZERO {
        return Err(BondError::invalid_bond(format!(
            "face amount must be positive, got {face}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlab_core::calendars::NullCalendar;
    use bondlab_core::types::Period;
    use rust_decimal_macros::dec;

    use crate::cashflows::{CashFlowKind, DateGenerationRule, ScheduleGenerator};
    use crate::types::ExercisePoint;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn schedule() -> Schedule {
        ScheduleGenerator::new(&NullCalendar)
            .generate(
                date(2022, 1, 1),
                date(2032, 1, 1),
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Backward,
            )
            .unwrap()
    }

    fn level_bond() -> Bond {
        Bond::fixed_rate(
            dec!(1000),
            schedule(),
            dec!(0.05),
            DayCountConvention::Thirty360BondBasis,
            date(2022, 1, 1),
            BusinessDayConvention::Unadjusted,
            &NullCalendar,
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_rate_bond() {
        let bond = level_bond();
        assert_eq!(bond.face_amount(), dec!(1000));
        assert_eq!(bond.maturity_date(), date(2032, 1, 1));
        assert_eq!(bond.redemption(), dec!(100));
        assert_eq!(bond.cashflows().len(), 20);
        assert_eq!(bond.total_principal(), dec!(1000));
        assert_eq!(bond.variant().name(), "level");
        assert!(bond.overlay().is_none());
    }

    #[test]
    fn test_invalid_face() {
        for face in [dec!(0), dec!(-100)] {
            let result = Bond::fixed_rate(
                face,
                schedule(),
                dec!(0.05),
                DayCountConvention::Thirty360BondBasis,
                date(2022, 1, 1),
                BusinessDayConvention::Unadjusted,
                &NullCalendar,
            );
            assert!(matches!(result, Err(BondError::InvalidBond { .. })));
        }
    }

    #[test]
    fn test_amortizing_wraps_base() {
        let base = level_bond();
        let bond = Bond::amortizing(
            &base,
            vec![AmortizationEntry::new(date(2026, 1, 1), dec!(0.2))],
        )
        .unwrap();

        assert_eq!(bond.total_principal(), dec!(800));
        assert_eq!(base.total_principal(), dec!(1000));
        assert_eq!(
            bond.variant().coupon_source(),
            &StructuralVariant::Level { rate: dec!(0.05) }
        );
    }

    #[test]
    fn test_factored_bond() {
        let bond = Bond::factored(&level_bond(), dec!(0.5)).unwrap();
        assert!(bond.cashflows().iter().all(|cf| cf.coupon() == dec!(12.5)));
        assert_eq!(bond.cashflows()[19].kind(), CashFlowKind::CouponAndPrincipal);
        assert_eq!(bond.variant().name(), "factored");
    }

    #[test]
    fn test_overlay_dates_must_be_in_life() {
        let bond = level_bond();
        let late = ExerciseOverlay::call(vec![ExercisePoint::new(date(2033, 1, 1), dec!(100))])
            .unwrap();
        assert!(bond.with_overlay(late).is_err());

        let early = ExerciseOverlay::put(vec![ExercisePoint::new(date(2022, 1, 1), dec!(100))])
            .unwrap();
        assert!(bond.with_overlay(early).is_err());

        let ok = ExerciseOverlay::call(vec![ExercisePoint::new(date(2027, 1, 1), dec!(101))])
            .unwrap();
        let callable = bond.with_overlay(ok).unwrap();
        assert!(callable.overlay().is_some_and(ExerciseOverlay::is_call));
        // Overlay does not touch the flows
        assert_eq!(callable.cashflows(), bond.cashflows());
    }

    #[test]
    fn test_variant_serde() {
        let variant = StructuralVariant::Factored {
            base: Box::new(StructuralVariant::Level { rate: dec!(0.05) }),
            factor: dec!(0.8),
        };
        let json = serde_json::to_string(&variant).unwrap();
        assert!(json.contains("\"type\":\"factored\""));
        let parsed: StructuralVariant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, variant);
    }
}
