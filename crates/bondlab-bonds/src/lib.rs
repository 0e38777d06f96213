//! # BondLab Bonds
//!
//! Bond construction, pricing and risk analytics for BondLab.
//!
//! This crate provides:
//!
//! - **Cash Flows**: Schedule generation, coupon and principal flows, accrued interest
//! - **Instruments**: Level, stepped, amortizing and pool-factor bonds with put or call overlays
//! - **Pricing**: Clean and dirty price from yield, yield from price, yield to worst
//! - **Risk**: Duration, convexity, DV01
//! - **Catalog**: One settlement date and calendar shared by construction and analytics
//!
//! ## Example
//!
//! ```rust
//! use bondlab_bonds::prelude::*;
//! use bondlab_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let catalog = BondCatalog::from_json(r#"{ "settlement_date": "2025-04-26" }"#).unwrap();
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
//! let ytm = catalog.yield_from_price(&bond, 98.5, &conv).unwrap();
//! assert!(ytm > 0.05);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unnecessary_unwrap)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::useless_conversion)]
#![allow(clippy::unused_self)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::single_match)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::float_cmp)]
#![allow(clippy::while_let_loop)]
#![allow(clippy::used_underscore_items)]
#![allow(clippy::borrowed_box)]

pub mod cashflows;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod risk;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cash flows
    pub use crate::cashflows::{
        AccruedInterestCalculator, CashFlow, CashFlowBuilder, CashFlowEntry, CashFlowKind,
        DateGenerationRule, Schedule, ScheduleGenerator,
    };

    // Catalog and configuration
    pub use crate::catalog::BondCatalog;
    pub use crate::config::{CalendarSpec, CatalogConfig, SolverSettings};
    pub use crate::context::EvaluationContext;

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Instruments
    pub use crate::instruments::{Bond, StructuralVariant};

    // Pricing
    pub use crate::pricing::{PricingEngine, YieldResult, YieldSolver};

    // Risk
    pub use crate::risk::{RiskAnalytics, BASIS_POINT};

    // Types
    pub use crate::types::{
        AmortizationEntry, CouponStep, DurationType, ExerciseOverlay, ExercisePoint,
        YieldConvention,
    };
}

pub use catalog::BondCatalog;
pub use config::CatalogConfig;
pub use error::{BondError, BondResult};
pub use instruments::Bond;
