//! Domain types for fixed income analytics.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`Period`]: Tenor such as `6M` or `1Y`
//! - [`Frequency`]: Coupon payment frequency
//! - [`Compounding`]: Interest compounding convention for yields

mod date;
mod frequency;
mod period;

pub use date::Date;
pub use frequency::{Compounding, Frequency};
pub use period::{Period, TimeUnit};
