//! Derived fuel statistics - distance, efficiency and cost.
//!
//! Everything here is a pure function over fill-up models that were already
//! loaded, so the same rules serve the database-backed operations, the
//! memoized instances and the reports. Callers pass the fill-ups of a single
//! vehicle; order does not matter, ties on `date` are broken by `id`.
//!
//! Two rules hold for every ratio:
//! - a distance of zero counts as "no value", so a vehicle with a single
//!   fill-up reports no fleet MPG rather than `0`;
//! - a zero gallons denominator also yields `None`, never a panic.

use crate::entities::fillup;
use rust_decimal::Decimal;
use tracing::debug;

/// Chronological sort key: date first, then insertion order.
fn chronological_key(fillup: &fillup::Model) -> (chrono::NaiveDate, i64) {
    (fillup.date, fillup.id)
}

/// Sorts fill-ups oldest first.
pub fn sort_chronologically(fillups: &mut [fillup::Model]) {
    fillups.sort_by_key(chronological_key);
}

/// The earliest fill-up by date, or `None` when there are none.
#[must_use]
pub fn first_fillup(fillups: &[fillup::Model]) -> Option<&fillup::Model> {
    fillups.iter().min_by_key(|f| chronological_key(f))
}

/// The latest fill-up by date, or `None` when there are none.
#[must_use]
pub fn last_fillup(fillups: &[fillup::Model]) -> Option<&fillup::Model> {
    fillups.iter().max_by_key(|f| chronological_key(f))
}

/// Odometer of the latest fill-up minus odometer of the earliest.
///
/// A single fill-up yields `Some(0)`.
#[must_use]
pub fn total_miles(fillups: &[fillup::Model]) -> Option<i64> {
    let first = first_fillup(fillups)?;
    let last = last_fillup(fillups)?;
    Some(i64::from(last.odometer) - i64::from(first.odometer))
}

/// Sum of gallons across all fill-ups.
#[must_use]
pub fn total_gallons(fillups: &[fillup::Model]) -> Decimal {
    fillups.iter().map(|f| f.gallons).sum()
}

/// Sum of [`total_cost`] across all fill-ups.
#[must_use]
pub fn total_spent(fillups: &[fillup::Model]) -> Decimal {
    fillups.iter().map(total_cost).sum()
}

/// Lifetime miles per gallon: [`total_miles`] over [`total_gallons`].
#[must_use]
pub fn total_mpg(fillups: &[fillup::Model]) -> Option<Decimal> {
    let miles = total_miles(fillups)?;
    miles_per_gallon(miles, total_gallons(fillups))
}

/// Price paid for one fill-up, in exact decimal arithmetic.
#[must_use]
pub fn total_cost(fillup: &fillup::Model) -> Decimal {
    fillup.gallons * fillup.price_per_gallon
}

/// The same-vehicle fill-up with the latest date strictly before `fillup`'s.
#[must_use]
pub fn previous_fillup<'a>(
    fillups: &'a [fillup::Model],
    fillup: &fillup::Model,
) -> Option<&'a fillup::Model> {
    fillups
        .iter()
        .filter(|f| f.vehicle_id == fillup.vehicle_id && f.date < fillup.date)
        .max_by_key(|f| chronological_key(f))
}

/// Miles since `previous`. Negative readings are reported as-is.
#[must_use]
pub fn miles_driven(fillup: &fillup::Model, previous: Option<&fillup::Model>) -> Option<i64> {
    previous.map(|p| i64::from(fillup.odometer) - i64::from(p.odometer))
}

/// Miles per gallon for the tank filled at `fillup`.
#[must_use]
pub fn mpg(fillup: &fillup::Model, previous: Option<&fillup::Model>) -> Option<Decimal> {
    let miles = miles_driven(fillup, previous)?;
    miles_per_gallon(miles, fillup.gallons)
}

fn miles_per_gallon(miles: i64, gallons: Decimal) -> Option<Decimal> {
    if miles == 0 {
        return None;
    }
    let ratio = Decimal::from(miles).checked_div(gallons);
    if ratio.is_none() {
        debug!("Skipping MPG for {miles} miles over {gallons} gallons");
    }
    ratio
}

/// Aggregate statistics for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleStats {
    /// Earliest fill-up, if any
    pub first_fillup: Option<fillup::Model>,
    /// Number of fill-ups recorded
    pub fillup_count: usize,
    /// Distance between the first and last odometer readings
    pub total_miles: Option<i64>,
    /// Gallons purchased across all fill-ups
    pub total_gallons: Decimal,
    /// Money spent across all fill-ups
    pub total_spent: Decimal,
    /// Lifetime miles per gallon
    pub total_mpg: Option<Decimal>,
}

impl VehicleStats {
    /// Computes the statistics from the vehicle's fill-ups.
    #[must_use]
    pub fn from_fillups(fillups: &[fillup::Model]) -> Self {
        Self {
            first_fillup: first_fillup(fillups).cloned(),
            fillup_count: fillups.len(),
            total_miles: total_miles(fillups),
            total_gallons: total_gallons(fillups),
            total_spent: total_spent(fillups),
            total_mpg: total_mpg(fillups),
        }
    }
}

/// Per-event statistics for one fill-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillupStats {
    /// Gallons times price per gallon
    pub total_cost: Decimal,
    /// The fill-up before this one, if any
    pub previous_fillup: Option<fillup::Model>,
    /// Miles since the previous fill-up
    pub miles_driven: Option<i64>,
    /// Miles per gallon for this tank
    pub mpg: Option<Decimal>,
}

impl FillupStats {
    /// Computes the statistics for `fillup` relative to `previous`.
    #[must_use]
    pub fn new(fillup: &fillup::Model, previous: Option<&fillup::Model>) -> Self {
        Self {
            total_cost: total_cost(fillup),
            previous_fillup: previous.cloned(),
            miles_driven: miles_driven(fillup, previous),
            mpg: mpg(fillup, previous),
        }
    }
}
