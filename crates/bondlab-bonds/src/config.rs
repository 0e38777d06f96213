//! Catalog configuration.
//!
//! A [`CatalogConfig`] is plain data loadable from JSON:
//!
//! ```rust
//! use bondlab_bonds::config::{CalendarSpec, CatalogConfig};
//!
//! let config = CatalogConfig::from_json(
//!     r#"{
//!         "settlement_date": "2025-04-26",
//!         "calendar": { "type": "weekend" },
//!         "solver": { "tolerance": 1e-10, "max_iterations": 100 },
//!         "include_settlement_date_flows": true
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.calendar, CalendarSpec::Weekend);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bondlab_core::calendars::{Calendar, HolidayCalendar, NullCalendar, WeekendCalendar};
use bondlab_core::types::Date;
use bondlab_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::error::{BondError, BondResult};

/// Which business day calendar a catalog uses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarSpec {
    /// Saturdays and Sundays are holidays.
    #[default]
    Weekend,
    /// Every day is a business day.
    Null,
    /// Weekends plus an explicit holiday list.
    Holidays {
        /// Calendar name
        name: String,
        /// Holiday dates
        holidays: Vec<Date>,
    },
}

impl CalendarSpec {
    /// Builds the calendar.
    #[must_use]
    pub fn build(&self) -> Arc<dyn Calendar> {
        match self {
            CalendarSpec::Weekend => Arc::new(WeekendCalendar),
            CalendarSpec::Null => Arc::new(NullCalendar),
            CalendarSpec::Holidays { name, holidays } => {
                Arc::new(HolidayCalendar::new(name.clone(), holidays.iter().copied()))
            }
        }
    }
}

/// Yield solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Price tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration budget
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_true() -> bool {
    true
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverSettings {
    /// Converts to a solver configuration.
    #[must_use]
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    fn validate(&self) -> BondResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(BondError::config(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(BondError::config("solver max_iterations must be positive"));
        }
        Ok(())
    }
}

/// Configuration of a [`BondCatalog`](crate::catalog::BondCatalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Evaluation (settlement) date
    pub settlement_date: Date,

    /// Business day calendar
    #[serde(default)]
    pub calendar: CalendarSpec,

    /// Yield solver settings
    #[serde(default)]
    pub solver: SolverSettings,

    /// Whether a flow paid on the settlement date is still priced
    #[serde(default = "default_true")]
    pub include_settlement_date_flows: bool,
}

impl CatalogConfig {
    /// Creates a configuration with defaults for everything but the date.
    #[must_use]
    pub fn new(settlement_date: Date) -> Self {
        Self {
            settlement_date,
            calendar: CalendarSpec::default(),
            solver: SolverSettings::default(),
            include_settlement_date_flows: true,
        }
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarSpec) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the solver settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Sets settlement-date flow inclusion.
    #[must_use]
    pub fn with_settlement_date_flows(mut self, include: bool) -> Self {
        self.include_settlement_date_flows = include;
        self
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` if the JSON is malformed or the solver
    /// settings are not positive.
    pub fn from_json(json: &str) -> BondResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> BondResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BondError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Checks the solver settings.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` for a non-positive tolerance or budget.
    pub fn validate(&self) -> BondResult<()> {
        self.solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = CatalogConfig::from_json(r#"{ "settlement_date": "2025-04-26" }"#).unwrap();
        assert_eq!(config, CatalogConfig::new(Date::from_ymd(2025, 4, 26).unwrap()));
        assert!(config.include_settlement_date_flows);
        assert_eq!(config.solver.max_iterations, 100);
    }

    #[test]
    fn test_holiday_calendar_spec() {
        let config = CatalogConfig::from_json(
            r#"{
                "settlement_date": "2025-04-26",
                "calendar": { "type": "holidays", "name": "Desk", "holidays": ["2025-12-25"] },
                "include_settlement_date_flows": false
            }"#,
        )
        .unwrap();

        let calendar = config.calendar.build();
        assert_eq!(calendar.name(), "Desk");
        assert!(!calendar.is_business_day(Date::from_ymd(2025, 12, 25).unwrap()));
        assert!(!config.include_settlement_date_flows);
    }

    #[test]
    fn test_null_calendar_spec() {
        let calendar = CalendarSpec::Null.build();
        assert!(calendar.is_business_day(Date::from_ymd(2025, 4, 26).unwrap()));
    }

    #[test]
    fn test_invalid_solver_settings() {
        let zero_tol = r#"{ "settlement_date": "2025-04-26", "solver": { "tolerance": 0.0 } }"#;
        assert!(matches!(
            CatalogConfig::from_json(zero_tol),
            Err(BondError::Config { .. })
        ));

        let zero_iter = r#"{ "settlement_date": "2025-04-26", "solver": { "max_iterations": 0 } }"#;
        assert!(matches!(
            CatalogConfig::from_json(zero_iter),
            Err(BondError::Config { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CatalogConfig::from_json(r#"{ "settlement_date": "26/04/2025" }"#),
            Err(BondError::Config { .. })
        ));
        assert!(matches!(
            CatalogConfig::from_json_file("/nonexistent/bondlab.json"),
            Err(BondError::Config { .. })
        ));
    }
}
