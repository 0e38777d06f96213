//! Evaluation context.

use std::fmt;
use std::sync::Arc;

use bondlab_core::calendars::Calendar;
use bondlab_core::types::Date;

/// Settlement date and calendar that analytics are evaluated against.
///
/// Each catalog owns its own context, so catalogs with different settlement
/// dates never interfere.
#[derive(Clone)]
pub struct EvaluationContext {
    settlement_date: Date,
    calendar: Arc<dyn Calendar>,
}

impl EvaluationContext {
    /// Creates a context.
    #[must_use]
    pub fn new(settlement_date: Date, calendar: Arc<dyn Calendar>) -> Self {
        Self {
            settlement_date,
            calendar,
        }
    }

    /// Returns the settlement date.
    #[must_use]
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// Returns the calendar.
    #[must_use]
    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// Returns a copy at another settlement date, sharing the calendar.
    #[must_use]
    pub fn with_settlement_date(&self, settlement_date: Date) -> Self {
        Self {
            settlement_date,
            calendar: Arc::clone(&self.calendar),
        }
    }
}

impl fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("settlement_date", &self.settlement_date)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}
