//! # BondLab Core
//!
//! Core types, day counts, and calendars for the BondLab fixed income engine.
//!
//! This crate provides the foundational building blocks used throughout BondLab:
//!
//! - **Types**: `Date`, `Period`, `Frequency`, `Compounding`
//! - **Day Count Conventions**: 30/360 Bond Basis, 30E/360, ACT/360, ACT/365F, ACT/ACT ISDA
//! - **Business Day Calendars**: the `Calendar` oracle and simple implementations
//!
//! ## Example
//!
//! ```rust
//! use bondlab_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = start.advance(Period::months(6)).unwrap();
//!
//! let dc = DayCountConvention::Thirty360BondBasis.to_day_count();
//! assert_eq!(dc.day_count(start, end), 180);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, NullCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Compounding, Date, Frequency, Period, TimeUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Compounding, Date, Frequency, Period, TimeUnit};
