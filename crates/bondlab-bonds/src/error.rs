//! Error types for bond operations.

use rust_decimal::Decimal;
use thiserror::Error;

use bondlab_core::CoreError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond construction and analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Schedule dates or tenor are invalid.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of what's invalid.
        reason: String,
    },

    /// Coupon step table is empty or out of order.
    #[error("Invalid step schedule: {reason}")]
    InvalidStepSchedule {
        /// Description of what's invalid.
        reason: String,
    },

    /// Principal reductions exceed the original face or are negative.
    #[error("Over-amortization: reductions total {total} of original face")]
    OverAmortization {
        /// Sum of the requested reduction fractions.
        total: Decimal,
    },

    /// Yield solver could not bracket or converge.
    #[error("Yield not found: {reason}")]
    YieldNotFound {
        /// Description of the failure.
        reason: String,
    },

    /// Requested day count convention is not implemented.
    #[error("Unsupported day count convention: '{name}'")]
    UnsupportedDayCount {
        /// The name that was requested.
        name: String,
    },

    /// Invalid bond specification.
    #[error("Invalid bond: {reason}")]
    InvalidBond {
        /// Description of what's invalid.
        reason: String,
    },

    /// Catalog configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[source] CoreError),
}

impl BondError {
    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid step schedule error.
    #[must_use]
    pub fn invalid_step_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidStepSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an over-amortization error.
    #[must_use]
    pub fn over_amortization(total: Decimal) -> Self {
        Self::OverAmortization { total }
    }

    /// Creates a yield not found error.
    #[must_use]
    pub fn yield_not_found(reason: impl Into<String>) -> Self {
        Self::YieldNotFound {
            reason: reason.into(),
        }
    }

    /// Creates an invalid bond error.
    #[must_use]
    pub fn invalid_bond(reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for BondError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedDayCount { name } => Self::UnsupportedDayCount { name },
            other => Self::Core(other),
        }
    }
}

impl From<serde_json::Error> for BondError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}
