//! Report generation business logic.
//!
//! This module assembles per-vehicle fuel reports and turns them into text.
//! Statistics come from [`crate::core::metrics`]; a value that cannot be
//! determined is printed as `n/a`.

use crate::{
    core::{
        fillup::get_fillups_for_vehicle,
        metrics::{self, FillupStats, VehicleStats},
        vehicle::require_vehicle,
    },
    entities::{fillup, vehicle},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Placeholder printed for absent values.
pub const NOT_AVAILABLE: &str = "n/a";

/// One fill-up together with its derived statistics.
#[derive(Debug, Clone)]
pub struct FillupLine {
    /// The fill-up
    pub fillup: fillup::Model,
    /// Cost, distance and efficiency for this fill-up
    pub stats: FillupStats,
}

/// Everything needed to show a vehicle's fuel history.
#[derive(Debug, Clone)]
pub struct VehicleReport {
    /// The vehicle being reported on
    pub vehicle: vehicle::Model,
    /// Lifetime statistics
    pub stats: VehicleStats,
    /// Most recent fill-ups, newest first
    pub recent_fillups: Vec<FillupLine>,
}

/// Generates a report for a vehicle.
///
/// # Arguments
/// * `db` - Database connection
/// * `vehicle_id` - ID of the vehicle to report on
/// * `fillup_limit` - Maximum number of recent fill-ups to include (default 10)
pub async fn generate_vehicle_report(
    db: &DatabaseConnection,
    vehicle_id: i64,
    fillup_limit: Option<usize>,
) -> Result<VehicleReport> {
    let vehicle = require_vehicle(db, vehicle_id).await?;
    let fillups = get_fillups_for_vehicle(db, vehicle_id).await?;

    let stats = VehicleStats::from_fillups(&fillups);

    let limit = fillup_limit.unwrap_or(10);
    let recent_fillups = fillups
        .iter()
        .rev()
        .take(limit)
        .map(|f| FillupLine {
            fillup: f.clone(),
            stats: FillupStats::new(f, metrics::previous_fillup(&fillups, f)),
        })
        .collect();

    Ok(VehicleReport {
        vehicle,
        stats,
        recent_fillups,
    })
}

/// Formats an optional decimal rounded to `places`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn format_optional_decimal(value: Option<Decimal>, places: u32) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| v.round_dp(places).to_string(),
    )
}

/// Formats miles per gallon with one decimal place, e.g. `"28.6 mpg"`.
#[must_use]
pub fn format_mpg(mpg: Option<Decimal>) -> String {
    mpg.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("{} mpg", v.round_dp(1)),
    )
}

/// Formats a money amount as dollars and cents, e.g. `"$43.24"`.
#[must_use]
pub fn format_cost(cost: Decimal) -> String {
    format!("${:.2}", cost.round_dp(2))
}

/// Formats optional miles, e.g. `"400 mi"`.
#[must_use]
pub fn format_miles(miles: Option<i64>) -> String {
    miles.map_or_else(|| NOT_AVAILABLE.to_string(), |m| format!("{m} mi"))
}

/// Renders a report as multi-line text.
#[must_use]
pub fn format_vehicle_report(report: &VehicleReport) -> String {
    use std::fmt::Write;

    let stats = &report.stats;
    let mut out = format!(
        "{} ({} {} {}, owner {})\n",
        report.vehicle,
        report.vehicle.year,
        report.vehicle.make,
        report.vehicle.model_name,
        report.vehicle.owner
    );
    let _ = writeln!(
        out,
        "  fill-ups: {} | distance: {} | gallons: {} | spent: {} | efficiency: {}",
        stats.fillup_count,
        format_miles(stats.total_miles),
        stats.total_gallons.round_dp(3),
        format_cost(stats.total_spent),
        format_mpg(stats.total_mpg)
    );

    for line in &report.recent_fillups {
        let _ = writeln!(
            out,
            "  {} @ {} | {} gal x {} | {} | {} | {}",
            line.fillup.date,
            line.fillup.odometer,
            line.fillup.gallons,
            format_cost(line.fillup.price_per_gallon),
            format_cost(line.stats.total_cost),
            format_miles(line.stats.miles_driven),
            format_mpg(line.stats.mpg)
        );
    }

    out
}
