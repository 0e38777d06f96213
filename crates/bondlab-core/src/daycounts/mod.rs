//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how accrued interest is calculated
//! by specifying how to count days between two dates and the year basis.
//!
//! # Supported Conventions
//!
//! - [`Thirty360BondBasis`]: 30/360 Bond Basis (ISDA), the primary convention
//! - [`Thirty360European`]: 30E/360 (Eurobond Basis)
//! - [`Act360`]: Actual/360
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`ActActIsda`]: Actual/Actual ISDA
//!
//! # Additivity
//!
//! 30E/360 adjusts each date on its own, so
//! `f(d1, d3) == f(d1, d2) + f(d2, d3)` holds for every triple. Bond Basis
//! adjusts D2 depending on D1, so the identity can fail when the middle or
//! the final date is the 31st of a month (e.g. Jan 15 / Jan 31 / Feb 15). The ACT
//! conventions are additive except ACT/ACT ISDA, which is additive only
//! within one calendar year's basis.
//!
//! Additivity is exact for [`DayCount::day_count`]. [`DayCount::year_fraction`]
//! divides in `Decimal`, which rounds to 28 significant digits, so the
//! fractions agree only up to about `1e-26` (e.g. `3/360` against
//! `1/360 + 2/360` differs in the last digit).
//!
//! # Usage
//!
//! ```rust
//! use bondlab_core::daycounts::{DayCount, Thirty360BondBasis};
//! use bondlab_core::types::Date;
//!
//! let dc = Thirty360BondBasis;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 180);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::{Thirty360BondBasis, Thirty360European};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Zero when `start == end`, negative when `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions, this is actual calendar days.
    /// For 30/360 conventions, this uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of all supported day count conventions.
///
/// # Example
///
/// ```rust
/// use bondlab_core::daycounts::DayCountConvention;
/// use bondlab_core::types::Date;
///
/// let convention: DayCountConvention = "30/360".parse().unwrap();
/// let dc = convention.to_day_count();
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 7, 1).unwrap();
/// assert_eq!(dc.day_count(start, end), 180);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// 30/360 Bond Basis - US corporate, agency, municipal bonds
    #[default]
    Thirty360BondBasis,

    /// 30E/360 (Eurobond Basis) - Eurobonds, European corporates
    Thirty360European,

    /// Actual/360 - Money market instruments
    Act360,

    /// Actual/365 Fixed - UK Gilts, AUD/NZD markets
    Act365Fixed,

    /// Actual/Actual ISDA - Year-based split
    ActActIsda,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360BondBasis => Box::new(Thirty360BondBasis),
            DayCountConvention::Thirty360European => Box::new(Thirty360European),
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
        }
    }

    /// Year fraction under this convention without boxing.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        match self {
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.year_fraction(start, end),
            DayCountConvention::Thirty360European => Thirty360European.year_fraction(start, end),
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end),
        }
    }

    /// Day count under this convention without boxing.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.day_count(start, end),
            DayCountConvention::Thirty360European => Thirty360European.day_count(start, end),
            DayCountConvention::Act360 => Act360.day_count(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.day_count(start, end),
            DayCountConvention::ActActIsda => ActActIsda.day_count(start, end),
        }
    }

    /// Returns the canonical name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360BondBasis => "30/360 BOND BASIS",
            DayCountConvention::Thirty360European => "30E/360",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360BondBasis,
            DayCountConvention::Thirty360European,
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts market names ("30/360", "ACT/360", "ACT/ACT"), enum-style
    /// names ("Thirty360BondBasis") and common aliases ("BOND", "EUROBOND").
    /// Anything else fails with [`CoreError::UnsupportedDayCount`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "30/360" | "30/360 BOND BASIS" | "30/360 BB" | "BOND" | "BOND BASIS"
            | "30/360 ISDA" | "THIRTY360BONDBASIS" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360BondBasis)
            }

            "30E/360" | "30/360 ICMA" | "EUROBOND" | "EUROBOND BASIS" | "THIRTY360EUROPEAN" => {
                Ok(DayCountConvention::Thirty360European)
            }

            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365FIXED" | "ACT365" => Ok(DayCountConvention::Act365Fixed),

            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL ISDA" | "ACTACTISDA"
            | "ACTACT" => Ok(DayCountConvention::ActActIsda),

            _ => Err(CoreError::unsupported_day_count(s.trim())),
        }
    }
}
