//! Put and call exercise schedules.
//!
//! Overlays are data only: they never change how cash flows are generated.
//! Analytics use them for yield-to-exercise and yield-to-worst, treating the
//! exercise price as a deterministic redemption.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondlab_core::types::Date;

use crate::error::{BondError, BondResult};

/// A date on which the bond may be redeemed early, and the price paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePoint {
    /// Exercise date
    pub date: Date,
    /// Redemption price per 100 of face (e.g. 102 = 102%)
    pub price: Decimal,
}

impl ExercisePoint {
    /// Creates a new exercise point.
    #[must_use]
    pub fn new(date: Date, price: Decimal) -> Self {
        Self { date, price }
    }

    /// Returns the price as a fraction of face (e.g. 1.02 for 102).
    #[must_use]
    pub fn price_fraction(&self) -> Decimal {
        self.price / Decimal::ONE_HUNDRED
    }
}

/// Holder put or issuer call schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum ExerciseOverlay {
    /// Holder may put the bond back on each date.
    Put(Vec<ExercisePoint>),
    /// Issuer may call the bond on each date.
    Call(Vec<ExercisePoint>),
}

impl ExerciseOverlay {
    /// Creates a put schedule; points are sorted by date.
    ///
    /// # Errors
    ///
    /// See [`ExerciseOverlay::call`].
    pub fn put(points: Vec<ExercisePoint>) -> BondResult<Self> {
        Ok(Self::Put(validate_points(points)?))
    }

    /// Creates a call schedule; points are sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if the schedule is empty, has a
    /// non-positive price or repeats a date.
    pub fn call(points: Vec<ExercisePoint>) -> BondResult<Self> {
        Ok(Self::Call(validate_points(points)?))
    }

    /// Returns the exercise points in date order.
    #[must_use]
    pub fn points(&self) -> &[ExercisePoint] {
        match self {
            ExerciseOverlay::Put(points) | ExerciseOverlay::Call(points) => points,
        }
    }

    /// Returns true for a put schedule.
    #[must_use]
    pub fn is_put(&self) -> bool {
        matches!(self, ExerciseOverlay::Put(_))
    }

    /// Returns true for a call schedule.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, ExerciseOverlay::Call(_))
    }

    /// Returns the first exercise point strictly after `date`.
    #[must_use]
    pub fn next_after(&self, date: Date) -> Option<&ExercisePoint> {
        self.points().iter().find(|p| p.date > date)
    }

    /// Returns the exercise points strictly after `date`.
    pub fn points_after(&self, date: Date) -> impl Iterator<Item = &ExercisePoint> {
        self.points().iter().filter(move |p| p.date > date)
    }
}

fn validate_points(mut points: Vec<ExercisePoint>) -> BondResult<Vec<ExercisePoint>> {
    if points.is_empty() {
        return Err(BondError::invalid_bond(
            "exercise schedule needs at least one date",
        ));
    }
    if let Some(p) = points.iter().find(|p| p.price <= Decimal::ZERO) {
        return Err(BondError::invalid_bond(format!(
            "exercise price on {} must be positive, got {}",
            p.date, p.price
        )));
    }
    points.sort_by_key(|p| p.date);
    if let Some(w) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(BondError::invalid_bond(format!(
            "duplicate exercise date {}",
            w[0].date
        )));
    }
    Ok(points)
}
