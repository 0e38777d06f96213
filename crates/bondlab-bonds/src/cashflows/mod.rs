//! Cash flow model for bonds.
//!
//! - [`ScheduleGenerator`] produces the accrual boundaries
//! - [`CashFlowBuilder`] turns a schedule into [`CashFlow`]s and applies
//!   structural adjustments (steps, amortization, pool factors)
//! - [`AccruedInterestCalculator`] computes accrued interest at settlement

mod accrued;
mod builder;
mod schedule;

pub use accrued::AccruedInterestCalculator;
pub use builder::CashFlowBuilder;
pub use schedule::{DateGenerationRule, Schedule, ScheduleGenerator};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use bondlab_core::types::Date;

/// Which portions of a cash flow are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Interest only
    Coupon,
    /// Principal only
    Principal,
    /// Interest and principal paid together (typically the final flow)
    CouponAndPrincipal,
}

impl CashFlowKind {
    /// Derives the kind from the coupon and principal portions.
    #[must_use]
    pub fn from_portions(coupon: Decimal, principal: Decimal) -> Self {
        match (coupon.is_zero(), principal.is_zero()) {
            (_, true) => CashFlowKind::Coupon,
            (true, false) => CashFlowKind::Principal,
            (false, false) => CashFlowKind::CouponAndPrincipal,
        }
    }

    /// Returns true if the flow carries principal.
    #[must_use]
    pub fn has_principal(&self) -> bool {
        !matches!(self, CashFlowKind::Coupon)
    }
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "Coupon",
            CashFlowKind::Principal => "Principal",
            CashFlowKind::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A dated bond cash flow with its accrual period.
///
/// Cash flows are immutable; builders produce new vectors rather than
/// editing flows in place.
///
/// # Example
///
/// ```rust
/// use bondlab_bonds::cashflows::{CashFlow, CashFlowKind};
/// use bondlab_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::new(
///     Date::from_ymd(2025, 7, 1).unwrap(),
///     Date::from_ymd(2025, 1, 1).unwrap(),
///     Date::from_ymd(2025, 7, 1).unwrap(),
///     dec!(25),
///     dec!(1000),
///     dec!(0.05),
///     dec!(1000),
/// );
/// assert_eq!(cf.kind(), CashFlowKind::CouponAndPrincipal);
/// assert_eq!(cf.amount(), dec!(1025));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    payment_date: Date,
    accrual_start: Date,
    accrual_end: Date,
    kind: CashFlowKind,
    coupon: Decimal,
    principal: Decimal,
    /// Annual coupon rate applied over the accrual period
    rate: Decimal,
    /// Notional the coupon accrues on
    notional: Decimal,
}

impl CashFlow {
    /// Creates a cash flow; the kind is derived from the portions.
    #[must_use]
    pub fn new(
        payment_date: Date,
        accrual_start: Date,
        accrual_end: Date,
        coupon: Decimal,
        principal: Decimal,
        rate: Decimal,
        notional: Decimal,
    ) -> Self {
        Self {
            payment_date,
            accrual_start,
            accrual_end,
            kind: CashFlowKind::from_portions(coupon, principal),
            coupon,
            principal,
            rate,
            notional,
        }
    }

    /// Returns the payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the accrual start date.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Returns the accrual end date.
    #[must_use]
    pub fn accrual_end(&self) -> Date {
        self.accrual_end
    }

    /// Returns the kind.
    #[must_use]
    pub fn kind(&self) -> CashFlowKind {
        self.kind
    }

    /// Returns the coupon portion.
    #[must_use]
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Returns the principal portion.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the annual coupon rate for the accrual period.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the accruing notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Total amount paid: coupon plus principal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.coupon + self.principal
    }

    /// Returns true if `date` lies in `[accrual_start, accrual_end)`.
    #[must_use]
    pub fn accrues_on(&self, date: Date) -> bool {
        self.accrual_start <= date && date < self.accrual_end
    }

    /// Copy with a different principal portion.
    #[must_use]
    pub(crate) fn with_principal(&self, principal: Decimal) -> Self {
        Self::new(
            self.payment_date,
            self.accrual_start,
            self.accrual_end,
            self.coupon,
            principal,
            self.rate,
            self.notional,
        )
    }

    /// Copy with coupon and notional scaled by `factor`.
    #[must_use]
    pub(crate) fn scale_coupon(&self, factor: Decimal) -> Self {
        Self::new(
            self.payment_date,
            self.accrual_start,
            self.accrual_end,
            self.coupon * factor,
            self.principal,
            self.rate,
            self.notional * factor,
        )
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:.6}", self.payment_date, self.kind, self.amount())
    }
}

/// A `{date, amount}` view of a cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// Payment date
    pub date: Date,
    /// Total amount paid
    pub amount: Decimal,
}

impl From<&CashFlow> for CashFlowEntry {
    fn from(cf: &CashFlow) -> Self {
        Self {
            date: cf.payment_date(),
            amount: cf.amount(),
        }
    }
}
