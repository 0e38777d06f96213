//! Bond catalog: construction and analytics behind one settlement date.
//!
//! # Example
//!
//! ```rust
//! use bondlab_bonds::prelude::*;
//! use bondlab_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = CatalogConfig::new(Date::from_ymd(2025, 4, 26).unwrap());
//! let catalog = BondCatalog::new(config).unwrap();
//!
//! let schedule = catalog
//!     .create_schedule(
//!         Date::from_ymd(2022, 1, 1).unwrap(),
//!         Date::from_ymd(2032, 1, 1).unwrap(),
//!         Period::months(6),
//!         BusinessDayConvention::Unadjusted,
//!         DateGenerationRule::Backward,
//!     )
//!     .unwrap();
//! let bond = catalog
//!     .create_fixed_rate_bond(
//!         dec!(1000),
//!         schedule,
//!         dec!(0.05),
//!         DayCountConvention::Thirty360BondBasis,
//!         Date::from_ymd(2022, 1, 1).unwrap(),
//!         BusinessDayConvention::Unadjusted,
//!     )
//!     .unwrap();
//!
//! let conv = YieldConvention::default();
//! let clean = catalog.price_from_yield(&bond, 0.052, &conv);
//! let y = catalog.yield_from_price(&bond, clean, &conv).unwrap();
//! assert!((y - 0.052).abs() < 1e-9);
//! ```

use log::debug;
use rust_decimal::Decimal;

use bondlab_core::calendars::BusinessDayConvention;
use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::{Date, Period};

use crate::cashflows::{CashFlowEntry, DateGenerationRule, Schedule, ScheduleGenerator};
use crate::config::CatalogConfig;
use crate::context::EvaluationContext;
use crate::error::BondResult;
use crate::instruments::Bond;
use crate::pricing::{PricingEngine, YieldSolver};
use crate::risk::RiskAnalytics;
use crate::types::{
    AmortizationEntry, CouponStep, DurationType, ExerciseOverlay, ExercisePoint, YieldConvention,
};

/// Creates bonds and evaluates them as of the catalog's settlement date.
#[derive(Debug, Clone)]
pub struct BondCatalog {
    context: EvaluationContext,
    engine: PricingEngine,
}

impl BondCatalog {
    /// Creates a catalog from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` if the solver settings are invalid.
    pub fn new(config: CatalogConfig) -> BondResult<Self> {
        config.validate()?;
        let context = EvaluationContext::new(config.settlement_date, config.calendar.build());
        let engine = PricingEngine::new(config.settlement_date)
            .with_settlement_date_flows(config.include_settlement_date_flows)
            .with_solver(YieldSolver::with_config(config.solver.to_solver_config()));

        debug!(
            "catalog as of {} on {} calendar",
            context.settlement_date(),
            context.calendar().name()
        );
        Ok(Self { context, engine })
    }

    /// Creates a catalog from a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` if the JSON is malformed or invalid.
    pub fn from_json(json: &str) -> BondResult<Self> {
        Self::new(CatalogConfig::from_json(json)?)
    }

    /// Creates a catalog over an existing context with default settings.
    #[must_use]
    pub fn with_context(context: EvaluationContext) -> Self {
        let engine = PricingEngine::new(context.settlement_date());
        Self { context, engine }
    }

    /// Returns the evaluation context.
    #[must_use]
    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    /// Returns the settlement date.
    #[must_use]
    pub fn settlement_date(&self) -> Date {
        self.context.settlement_date()
    }

    /// Returns the pricing engine.
    #[must_use]
    pub fn pricing_engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Returns the risk calculations.
    #[must_use]
    pub fn risk(&self) -> RiskAnalytics<'_> {
        RiskAnalytics::new(&self.engine)
    }

    // ---- construction ----

    /// Generates a schedule on the catalog calendar.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSchedule` for inverted dates or a
    /// non-positive tenor.
    pub fn create_schedule(
        &self,
        issue: Date,
        maturity: Date,
        tenor: Period,
        convention: BusinessDayConvention,
        rule: DateGenerationRule,
    ) -> BondResult<Schedule> {
        ScheduleGenerator::new(self.context.calendar())
            .generate(issue, maturity, tenor, convention, rule)
    }

    /// Creates a level coupon bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` for a non-positive face.
    pub fn create_fixed_rate_bond(
        &self,
        face: Decimal,
        schedule: Schedule,
        rate: Decimal,
        day_count: DayCountConvention,
        issue_date: Date,
        payment_convention: BusinessDayConvention,
    ) -> BondResult<Bond> {
        Bond::fixed_rate(
            face,
            schedule,
            rate,
            day_count,
            issue_date,
            payment_convention,
            self.context.calendar(),
        )
    }

    /// Creates a stepped coupon bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidStepSchedule` for an empty or unsorted
    /// step table.
    pub fn create_stepped_coupon_bond(
        &self,
        face: Decimal,
        schedule: Schedule,
        steps: Vec<CouponStep>,
        day_count: DayCountConvention,
        issue_date: Date,
        payment_convention: BusinessDayConvention,
    ) -> BondResult<Bond> {
        Bond::stepped_coupon(
            face,
            schedule,
            steps,
            day_count,
            issue_date,
            payment_convention,
            self.context.calendar(),
        )
    }

    /// Derives an amortizing bond from `base`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::OverAmortization` for negative or excessive
    /// reductions.
    pub fn create_amortizing_bond(
        &self,
        base: &Bond,
        reductions: Vec<AmortizationEntry>,
    ) -> BondResult<Bond> {
        Bond::amortizing(base, reductions)
    }

    /// Derives a pass-through bond with coupons scaled by a pool factor.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` for a factor outside `[0, 1]`.
    pub fn create_mbs_bond(&self, base: &Bond, factor: Decimal) -> BondResult<Bond> {
        Bond::factored(base, factor)
    }

    /// Adds a holder put schedule to `base`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` for an empty schedule or dates
    /// outside the bond's life.
    pub fn create_puttable_bond(
        &self,
        base: &Bond,
        points: Vec<ExercisePoint>,
    ) -> BondResult<Bond> {
        base.with_overlay(ExerciseOverlay::put(points)?)
    }

    /// Adds an issuer call schedule to `base`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` for an empty schedule or dates
    /// outside the bond's life.
    pub fn create_callable_bond(
        &self,
        base: &Bond,
        points: Vec<ExercisePoint>,
    ) -> BondResult<Bond> {
        base.with_overlay(ExerciseOverlay::call(points)?)
    }

    // ---- pricing ----

    /// Clean price per 100 at yield `y`.
    #[must_use]
    pub fn price_from_yield(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.engine.clean_price(bond, y, conv)
    }

    /// Clean price per 100 at yield `y`.
    #[must_use]
    pub fn clean_price(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.engine.clean_price(bond, y, conv)
    }

    /// Dirty price per 100 at yield `y`.
    #[must_use]
    pub fn dirty_price(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.engine.dirty_price(bond, y, conv)
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
        self.engine.yield_from_price(bond, clean_price, conv)
    }

    /// Lowest of the yield to maturity and the yields to each remaining
    /// call date.
    ///
    /// # Errors
    ///
    /// Returns `BondError::YieldNotFound` if any yield cannot be solved.
    pub fn yield_to_worst(
        &self,
        bond: &Bond,
        clean_price: f64,
        conv: &YieldConvention,
    ) -> BondResult<f64> {
        self.engine.yield_to_worst(bond, clean_price, conv)
    }

    // ---- risk ----

    /// Accrued interest in currency at settlement.
    #[must_use]
    pub fn accrued_interest(&self, bond: &Bond) -> Decimal {
        self.risk().accrued_interest(bond)
    }

    /// Days accrued at settlement.
    #[must_use]
    pub fn accrued_days(&self, bond: &Bond) -> i64 {
        self.risk().accrued_days(bond)
    }

    /// Macaulay or modified duration.
    #[must_use]
    pub fn duration(
        &self,
        bond: &Bond,
        y: f64,
        conv: &YieldConvention,
        duration_type: DurationType,
    ) -> f64 {
        self.risk().duration(bond, y, conv, duration_type)
    }

    /// Convexity.
    #[must_use]
    pub fn convexity(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.risk().convexity(bond, y, conv)
    }

    /// Signed dirty price change per 100 for +1bp.
    #[must_use]
    pub fn dv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.risk().dv01(bond, y, conv)
    }

    /// Same as [`BondCatalog::dv01`].
    #[must_use]
    pub fn pv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.risk().pv01(bond, y, conv)
    }

    /// DV01 scaled to the bond's face amount.
    #[must_use]
    pub fn dollar_dv01(&self, bond: &Bond, y: f64, conv: &YieldConvention) -> f64 {
        self.risk().dollar_dv01(bond, y, conv)
    }

    // ---- cash flow views ----

    /// Flows paid on or after settlement.
    #[must_use]
    pub fn cashflows(&self, bond: &Bond) -> Vec<CashFlowEntry> {
        let settlement = self.settlement_date();
        bond.cashflows()
            .iter()
            .filter(|cf| cf.payment_date() >= settlement)
            .map(CashFlowEntry::from)
            .collect()
    }

    /// Payment dates of every flow with a positive amount.
    #[must_use]
    pub fn payment_schedule(&self, bond: &Bond) -> Vec<Date> {
        bond.cashflows()
            .iter()
            .filter(|cf| cf.amount() > Decimal::ZERO)
            .map(|cf| cf.payment_date())
            .collect()
    }
}
