//! Schedule generation for bond cash flows.
//!
//! Boundaries are generated by stepping a tenor from an anchor date and then
//! adjusted through the [`Calendar`] oracle:
//! - [`DateGenerationRule::Backward`] anchors at maturity (stub at the front)
//! - [`DateGenerationRule::Forward`] anchors at issue (stub at the back)
//!
//! Each boundary is computed as `anchor + k * tenor` rather than by repeated
//! stepping, so month-end clamping in one period never drifts into the next.
//!
//! # Example
//!
//! ```rust
//! use bondlab_bonds::cashflows::{DateGenerationRule, ScheduleGenerator};
//! use bondlab_core::calendars::{BusinessDayConvention, WeekendCalendar};
//! use bondlab_core::types::{Date, Period};
//!
//! let generator = ScheduleGenerator::new(&WeekendCalendar);
//! let schedule = generator
//!     .generate(
//!         Date::from_ymd(2022, 1, 1).unwrap(),
//!         Date::from_ymd(2032, 1, 1).unwrap(),
//!         Period::months(6),
//!         BusinessDayConvention::Unadjusted,
//!         DateGenerationRule::Backward,
//!     )
//!     .unwrap();
//!
//! assert_eq!(schedule.num_periods(), 20);
//! ```

use serde::{Deserialize, Serialize};

use bondlab_core::calendars::{BusinessDayConvention, Calendar};
use bondlab_core::types::{Date, Period};

use crate::error::{BondError, BondResult};

/// Direction in which schedule boundaries are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateGenerationRule {
    /// Step back from maturity; any irregular period falls at the front.
    #[default]
    Backward,
    /// Step forward from issue; any irregular period falls at the back.
    Forward,
}

impl std::fmt::Display for DateGenerationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateGenerationRule::Backward => write!(f, "Backward"),
            DateGenerationRule::Forward => write!(f, "Forward"),
        }
    }
}

/// A date schedule of accrual period boundaries.
///
/// Adjusted dates are strictly increasing and unique; the first is the
/// (adjusted) start and the last is the (adjusted) maturity. Deserialized
/// schedules are checked against the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleData")]
pub struct Schedule {
    /// Unadjusted schedule dates
    unadjusted_dates: Vec<Date>,
    /// Adjusted schedule dates
    adjusted_dates: Vec<Date>,
    /// Business day convention used
    convention: BusinessDayConvention,
}

impl Schedule {
    /// Builds a schedule from explicit boundary dates, used as both the
    /// unadjusted and adjusted dates.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSchedule` if fewer than two dates are given
    /// or they are not strictly increasing.
    pub fn from_dates(dates: Vec<Date>) -> BondResult<Self> {
        validate_increasing(&dates)?;
        Ok(Self {
            unadjusted_dates: dates.clone(),
            adjusted_dates: dates,
            convention: BusinessDayConvention::Unadjusted,
        })
    }

    /// Returns the unadjusted schedule dates.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Returns the adjusted schedule dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Returns an iterator over the accrual periods (start, end).
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.adjusted_dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns the number of periods in the schedule.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.adjusted_dates.len().saturating_sub(1)
    }

    /// Returns the first boundary.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.adjusted_dates[0]
    }

    /// Returns the last boundary (maturity).
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.adjusted_dates[self.adjusted_dates.len() - 1]
    }

    /// Returns the business day convention used.
    #[must_use]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }
}

/// Unvalidated wire form of a [`Schedule`].
#[derive(Deserialize)]
struct ScheduleData {
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
    convention: BusinessDayConvention,
}

impl TryFrom<ScheduleData> for Schedule {
    type Error = BondError;

    fn try_from(data: ScheduleData) -> BondResult<Self> {
        validate_increasing(&data.unadjusted_dates)?;
        validate_increasing(&data.adjusted_dates)?;
        Ok(Self {
            unadjusted_dates: data.unadjusted_dates,
            adjusted_dates: data.adjusted_dates,
            convention: data.convention,
        })
    }
}

/// Generates schedules against a calendar.
pub struct ScheduleGenerator<'a> {
    calendar: &'a dyn Calendar,
}

impl<'a> ScheduleGenerator<'a> {
    /// Creates a generator that adjusts dates with `calendar`.
    #[must_use]
    pub fn new(calendar: &'a dyn Calendar) -> Self {
        Self { calendar }
    }

    /// Generates a schedule between `issue` and `maturity`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSchedule` when `issue >= maturity`, the
    /// tenor is not positive, or adjustment leaves the dates out of order.
    pub fn generate(
        &self,
        issue: Date,
        maturity: Date,
        tenor: Period,
        convention: BusinessDayConvention,
        rule: DateGenerationRule,
    ) -> BondResult<Schedule> {
        if issue >= maturity {
            return Err(BondError::invalid_schedule(format!(
                "issue date {issue} must be before maturity {maturity}"
            )));
        }
        if !tenor.is_positive() {
            return Err(BondError::invalid_schedule(format!(
                "tenor must be positive, got {tenor}"
            )));
        }

        let unadjusted = match rule {
            DateGenerationRule::Backward => Self::generate_backward(issue, maturity, tenor)?,
            DateGenerationRule::Forward => Self::generate_forward(issue, maturity, tenor)?,
        };

        let mut adjusted = Vec::with_capacity(unadjusted.len());
        for &date in &unadjusted {
            let date = self.calendar.adjust(date, convention)?;
            if adjusted.last() != Some(&date) {
                adjusted.push(date);
            }
        }
        validate_increasing(&adjusted)?;

        Ok(Schedule {
            unadjusted_dates: unadjusted,
            adjusted_dates: adjusted,
            convention,
        })
    }

    /// Generates dates backward from maturity.
    fn generate_backward(issue: Date, maturity: Date, tenor: Period) -> BondResult<Vec<Date>> {
        let mut dates = vec![maturity];
        let mut k = 1;
        loop {
            let date = maturity.advance(tenor.times(-k))?;
            if date <= issue {
                break;
            }
            dates.push(date);
            k += 1;
        }
        dates.push(issue);
        dates.reverse();
        Ok(dates)
    }

    /// Generates dates forward from issue.
    fn generate_forward(issue: Date, maturity: Date, tenor: Period) -> BondResult<Vec<Date>> {
        let mut dates = vec![issue];
        let mut k = 1;
        loop {
            let date = issue.advance(tenor.times(k))?;
            if date >= maturity {
                break;
            }
            dates.push(date);
            k += 1;
        }
        dates.push(maturity);
        Ok(dates)
    }
}

fn validate_increasing(dates: &[Date]) -> BondResult<()> {
    if dates.len() < 2 {
        return Err(BondError::invalid_schedule(
            "a schedule needs at least two dates",
        ));
    }
    if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
        return Err(BondError::invalid_schedule(format!(
            "dates not strictly increasing: {} then {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlab_core::calendars::{NullCalendar, WeekendCalendar};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_backward_semiannual() {
        let schedule = ScheduleGenerator::new(&NullCalendar)
            .generate(
                date(2022, 1, 1),
                date(2032, 1, 1),
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Backward,
            )
            .unwrap();

        assert_eq!(schedule.num_periods(), 20);
        assert_eq!(schedule.start_date(), date(2022, 1, 1));
        assert_eq!(schedule.maturity_date(), date(2032, 1, 1));
        assert_eq!(schedule.dates()[7], date(2025, 7, 1));
    }

    #[test]
    fn test_backward_front_stub() {
        let schedule = ScheduleGenerator::new(&NullCalendar)
            .generate(
                date(2025, 3, 10),
                date(2027, 1, 15),
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Backward,
            )
            .unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                date(2025, 3, 10),
                date(2025, 7, 15),
                date(2026, 1, 15),
                date(2026, 7, 15),
                date(2027, 1, 15),
            ]
        );
    }

    #[test]
    fn test_forward_back_stub() {
        let schedule = ScheduleGenerator::new(&NullCalendar)
            .generate(
                date(2025, 1, 15),
                date(2026, 3, 1),
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Forward,
            )
            .unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                date(2025, 1, 15),
                date(2025, 7, 15),
                date(2026, 1, 15),
                date(2026, 3, 1),
            ]
        );
    }

    #[test]
    fn test_month_end_does_not_drift() {
        // Stepping from Aug 31: Feb clamps to 28, but Aug stays 31
        let schedule = ScheduleGenerator::new(&NullCalendar)
            .generate(
                date(2024, 8, 31),
                date(2026, 8, 31),
                Period::months(6),
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Forward,
            )
            .unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                date(2024, 8, 31),
                date(2025, 2, 28),
                date(2025, 8, 31),
                date(2026, 2, 28),
                date(2026, 8, 31),
            ]
        );
    }

    #[test]
    fn test_business_day_adjustment() {
        let schedule = ScheduleGenerator::new(&WeekendCalendar)
            .generate(
                date(2022, 1, 1),
                date(2024, 1, 1),
                Period::months(6),
                BusinessDayConvention::Following,
                DateGenerationRule::Backward,
            )
            .unwrap();

        // 2022-01-01 is a Saturday, 2023-07-01 a Saturday
        assert_eq!(schedule.start_date(), date(2022, 1, 3));
        assert_eq!(schedule.dates()[3], date(2023, 7, 3));
        assert_eq!(schedule.unadjusted_dates()[0], date(2022, 1, 1));
        assert_eq!(schedule.convention(), BusinessDayConvention::Following);
    }

    #[test]
    fn test_adjusted_duplicates_collapse() {
        // Weekly dates on Sat 2025-01-04 and Sun 2025-01-05 both roll to Monday
        let schedule = ScheduleGenerator::new(&WeekendCalendar)
            .generate(
                date(2025, 1, 4),
                date(2025, 1, 5),
                Period::weeks(1),
                BusinessDayConvention::Following,
                DateGenerationRule::Backward,
            );
        assert!(matches!(schedule, Err(BondError::InvalidSchedule { .. })));

        let schedule = ScheduleGenerator::new(&WeekendCalendar)
            .generate(
                date(2025, 1, 4),
                date(2025, 1, 13),
                Period::days(1),
                BusinessDayConvention::Following,
                DateGenerationRule::Forward,
            )
            .unwrap();
        let dates = schedule.dates();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates[0], date(2025, 1, 6));
        assert_eq!(dates[dates.len() - 1], date(2025, 1, 13));
    }

    #[test]
    fn test_serde_round_trip() {
        let schedule = ScheduleGenerator::new(&WeekendCalendar)
            .generate(
                date(2022, 1, 1),
                date(2024, 1, 1),
                Period::months(6),
                BusinessDayConvention::Following,
                DateGenerationRule::Backward,
            )
            .unwrap();

        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_deserialize_rejects_empty_schedule() {
        let json = r#"{"unadjusted_dates":[],"adjusted_dates":[],"convention":"Unadjusted"}"#;
        let err = serde_json::from_str::<Schedule>(json).unwrap_err();
        assert!(err.to_string().contains("at least two dates"));
    }

    #[test]
    fn test_deserialize_rejects_inverted_dates() {
        let json = r#"{
            "unadjusted_dates": ["2030-01-01", "2025-01-01"],
            "adjusted_dates": ["2030-01-01", "2025-01-01"],
            "convention": "Unadjusted"
        }"#;
        let err = serde_json::from_str::<Schedule>(json).unwrap_err();
        assert!(err.to_string().contains("not strictly increasing"));

        // A single inverted list is enough
        let json = r#"{
            "unadjusted_dates": ["2025-01-01", "2030-01-01"],
            "adjusted_dates": ["2030-01-01", "2025-01-01"],
            "convention": "Unadjusted"
        }"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }

    #[test]
    fn test_invalid_dates() {
        let generator = ScheduleGenerator::new(&NullCalendar);
        let result = generator.generate(
            date(2030, 1, 1),
            date(2025, 1, 1),
            Period::months(6),
            BusinessDayConvention::Unadjusted,
            DateGenerationRule::Backward,
        );
        assert!(matches!(result, Err(BondError::InvalidSchedule { .. })));

        let result = generator.generate(
            date(2025, 1, 1),
            date(2025, 1, 1),
            Period::months(6),
            BusinessDayConvention::Unadjusted,
            DateGenerationRule::Backward,
        );
        assert!(matches!(result, Err(BondError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_non_positive_tenor() {
        let generator = ScheduleGenerator::new(&NullCalendar);
        for tenor in [Period::months(0), Period::months(-6)] {
            let result = generator.generate(
                date(2025, 1, 1),
                date(2030, 1, 1),
                tenor,
                BusinessDayConvention::Unadjusted,
                DateGenerationRule::Forward,
            );
            assert!(matches!(result, Err(BondError::InvalidSchedule { .. })));
        }
    }

    #[test]
    fn test_from_dates_validation() {
        assert!(Schedule::from_dates(vec![date(2025, 1, 1)]).is_err());
        assert!(Schedule::from_dates(vec![date(2025, 1, 1), date(2025, 1, 1)]).is_err());
        let schedule = Schedule::from_dates(vec![date(2025, 1, 1), date(2025, 7, 1)]).unwrap();
        assert_eq!(schedule.periods().count(), 1);
    }
}
