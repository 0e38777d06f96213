//! Yield quoting conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use bondlab_core::daycounts::DayCountConvention;
use bondlab_core::types::{Compounding, Frequency};

/// How a yield is turned into discount factors.
///
/// Time is measured from settlement with `day_count`; `frequency` is the
/// compounding frequency and is ignored for simple and continuous yields.
///
/// ```rust
/// use bondlab_bonds::types::YieldConvention;
/// use bondlab_core::types::{Compounding, Frequency};
///
/// let conv = YieldConvention::default().with_frequency(Frequency::Annual);
/// assert_eq!(conv.compounding, Compounding::Compounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct YieldConvention {
    /// Day count used for discounting times
    pub day_count: DayCountConvention,
    /// Compounding convention
    pub compounding: Compounding,
    /// Compounding frequency
    pub frequency: Frequency,
}

impl YieldConvention {
    /// Creates a yield convention.
    #[must_use]
    pub fn new(day_count: DayCountConvention, compounding: Compounding, frequency: Frequency) -> Self {
        Self {
            day_count,
            compounding,
            frequency,
        }
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the compounding convention.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the compounding frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }
}

impl fmt::Display for YieldConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day_count, self.compounding)?;
        if matches!(self.compounding, Compounding::Compounded) {
            write!(f, " {}", self.frequency)?;
        }
        Ok(())
    }
}

/// Duration measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationType {
    /// Present-value weighted average time to payment
    Macaulay,
    /// Relative price sensitivity to the yield
    #[default]
    Modified,
}
