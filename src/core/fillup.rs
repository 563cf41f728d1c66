//! Fill-up business logic - Handles all fill-up-related operations.
//!
//! This module provides functions for recording, retrieving, updating, listing
//! and deleting fill-ups, and for computing per-event statistics against the
//! previous fill-up of the same vehicle. Odometer readings and gallons are
//! stored as given; nothing here rejects a decreasing odometer or zero gallons.

use crate::{
    core::{metrics::FillupStats, vehicle::require_vehicle},
    entities::{Fillup, fillup},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Fields needed to record a fill-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFillup {
    /// Vehicle that was filled; cannot be changed afterwards
    pub vehicle_id: i64,
    /// Calendar date of the fill-up
    pub date: NaiveDate,
    /// Odometer reading
    pub odometer: i32,
    /// Gallons purchased
    pub gallons: Decimal,
    /// Price per gallon
    pub price_per_gallon: Decimal,
    /// Station name
    pub station: String,
    /// Station location
    pub location: String,
    /// Free-form notes
    pub notes: String,
}

/// Editable fill-up fields. `None` leaves a field untouched; the vehicle is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillupChanges {
    /// New date
    pub date: Option<NaiveDate>,
    /// New odometer reading
    pub odometer: Option<i32>,
    /// New gallons
    pub gallons: Option<Decimal>,
    /// New price per gallon
    pub price_per_gallon: Option<Decimal>,
    /// New station name
    pub station: Option<String>,
    /// New location
    pub location: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// Filters for [`list_fillups`]. Empty means "all fill-ups".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillupQuery {
    /// Only fill-ups of this vehicle
    pub vehicle_id: Option<i64>,
    /// Earliest date, inclusive
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive
    pub date_to: Option<NaiveDate>,
    /// Exact station name
    pub station: Option<String>,
    /// Substring matched against the station name
    pub search: Option<String>,
}

/// Records a fill-up for an existing vehicle.
pub async fn create_fillup(db: &DatabaseConnection, new: NewFillup) -> Result<fillup::Model> {
    require_vehicle(db, new.vehicle_id).await?;

    let fillup = fillup::ActiveModel {
        vehicle_id: Set(new.vehicle_id),
        date: Set(new.date),
        odometer: Set(new.odometer),
        gallons: Set(new.gallons),
        price_per_gallon: Set(new.price_per_gallon),
        station: Set(new.station),
        location: Set(new.location),
        notes: Set(new.notes),
        ..Default::default()
    };

    let result = fillup.insert(db).await?;
    info!(
        "Recorded fill-up {} for vehicle {} at {} miles",
        result.id, result.vehicle_id, result.odometer
    );
    Ok(result)
}

/// Finds a fill-up by its unique ID.
pub async fn get_fillup_by_id(
    db: &DatabaseConnection,
    fillup_id: i64,
) -> Result<Option<fillup::Model>> {
    Fillup::find_by_id(fillup_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_fillup_by_id`] but a missing fill-up is an error.
pub async fn require_fillup(db: &DatabaseConnection, fillup_id: i64) -> Result<fillup::Model> {
    get_fillup_by_id(db, fillup_id)
        .await?
        .ok_or(Error::FillupNotFound { id: fillup_id })
}

/// Applies `changes` to an existing fill-up and refreshes its `modified` stamp.
pub async fn update_fillup(
    db: &DatabaseConnection,
    fillup_id: i64,
    changes: FillupChanges,
) -> Result<fillup::Model> {
    let mut fillup: fillup::ActiveModel = require_fillup(db, fillup_id).await?.into();

    if let Some(date) = changes.date {
        fillup.date = Set(date);
    }
    if let Some(odometer) = changes.odometer {
        fillup.odometer = Set(odometer);
    }
    if let Some(gallons) = changes.gallons {
        fillup.gallons = Set(gallons);
    }
    if let Some(price) = changes.price_per_gallon {
        fillup.price_per_gallon = Set(price);
    }
    if let Some(station) = changes.station {
        fillup.station = Set(station);
    }
    if let Some(location) = changes.location {
        fillup.location = Set(location);
    }
    if let Some(notes) = changes.notes {
        fillup.notes = Set(notes);
    }

    fillup.update(db).await.map_err(Into::into)
}

/// Deletes a single fill-up.
pub async fn delete_fillup(db: &DatabaseConnection, fillup_id: i64) -> Result<()> {
    let fillup = require_fillup(db, fillup_id).await?;
    fillup.delete(db).await?;
    info!("Deleted fill-up {fillup_id}");
    Ok(())
}

/// All fill-ups of a vehicle, oldest first (ties by insertion order).
pub async fn get_fillups_for_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Vec<fillup::Model>> {
    Fillup::find()
        .filter(fillup::Column::VehicleId.eq(vehicle_id))
        .order_by_asc(fillup::Column::Date)
        .order_by_asc(fillup::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists fill-ups ordered by vehicle then date, narrowed by `query`.
pub async fn list_fillups(
    db: &DatabaseConnection,
    query: &FillupQuery,
) -> Result<Vec<fillup::Model>> {
    let mut select = Fillup::find();

    if let Some(vehicle_id) = query.vehicle_id {
        select = select.filter(fillup::Column::VehicleId.eq(vehicle_id));
    }
    if let Some(from) = query.date_from {
        select = select.filter(fillup::Column::Date.gte(from));
    }
    if let Some(to) = query.date_to {
        select = select.filter(fillup::Column::Date.lte(to));
    }
    if let Some(station) = &query.station {
        select = select.filter(fillup::Column::Station.eq(station.as_str()));
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(fillup::Column::Station.contains(term));
    }

    let fillups = select
        .order_by_asc(fillup::Column::VehicleId)
        .order_by_asc(fillup::Column::Date)
        .order_by_asc(fillup::Column::Id)
        .all(db)
        .await?;
    debug!("Listed {} fill-ups for {:?}", fillups.len(), query);
    Ok(fillups)
}

/// The fill-up of the same vehicle with the latest date strictly before `fillup`'s.
pub async fn previous_fillup(
    db: &DatabaseConnection,
    fillup: &fillup::Model,
) -> Result<Option<fillup::Model>> {
    Fillup::find()
        .filter(fillup::Column::VehicleId.eq(fillup.vehicle_id))
        .filter(fillup::Column::Date.lt(fillup.date))
        .order_by_desc(fillup::Column::Date)
        .order_by_desc(fillup::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Computes cost, distance and efficiency for one stored fill-up.
pub async fn fillup_stats(db: &DatabaseConnection, fillup_id: i64) -> Result<FillupStats> {
    let fillup = require_fillup(db, fillup_id).await?;
    let previous = previous_fillup(db, &fillup).await?;
    Ok(FillupStats::new(&fillup, previous.as_ref()))
}
