//! Calendar periods (tenors).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days
    Days,
    /// Weeks of seven calendar days
    Weeks,
    /// Calendar months (day clamped to month end)
    Months,
    /// Calendar years
    Years,
}

impl TimeUnit {
    fn suffix(self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

/// A tenor such as `6M` or `1Y`.
///
/// The length may be negative, which is how schedules step backwards from
/// maturity.
///
/// ```rust
/// use bondlab_core::types::{Period, TimeUnit};
///
/// let p: Period = "6M".parse().unwrap();
/// assert_eq!(p, Period::new(6, TimeUnit::Months));
/// assert_eq!(p.to_string(), "6M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// A period of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// A period of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// A period of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// A period of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Returns the signed length.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns true if the length is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.length > 0
    }

    /// Returns this period repeated `k` times.
    #[must_use]
    pub const fn times(&self, k: i32) -> Self {
        Self::new(self.length * k, self.unit)
    }

    /// Number of periods per year, when the tenor divides a year evenly.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        if self.length <= 0 {
            return None;
        }
        let len = self.length as u32;
        match self.unit {
            TimeUnit::Years if len == 1 => Some(1),
            TimeUnit::Months if 12 % len == 0 => Some(12 / len),
            TimeUnit::Weeks if 52 % len == 0 => Some(52 / len),
            _ => None,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::months(6)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TimeUnit::Days,
            Some('W') => TimeUnit::Weeks,
            Some('M') => TimeUnit::Months,
            Some('Y') => TimeUnit::Years,
            _ => return Err(CoreError::invalid_period(format!("missing unit in '{s}'"))),
        };
        let length = chars
            .as_str()
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_period(format!("invalid length in '{s}'")))?;
        Ok(Self::new(length, unit))
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
