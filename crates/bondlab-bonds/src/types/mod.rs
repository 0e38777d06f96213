//! Domain types for bond analytics.
//!
//! - [`AmortizationEntry`] / [`CouponStep`]: Principal reduction and coupon step tables
//! - [`ExerciseOverlay`] / [`ExercisePoint`]: Put and call schedules
//! - [`YieldConvention`]: Day count, compounding and frequency of a yield
//! - [`DurationType`]: Macaulay or modified duration

mod amortization;
mod options;
mod yield_convention;

pub use amortization::{total_fraction, AmortizationEntry, CouponStep};
pub use options::{ExerciseOverlay, ExercisePoint};
pub use yield_convention::{DurationType, YieldConvention};
