//! Loaded records with memoized derived statistics.
//!
//! A [`LoadedVehicle`] or [`LoadedFillup`] wraps one model read from the
//! database. The first request for a derived value runs the queries it needs
//! and caches the result on that instance; later requests reuse it even if the
//! stored data changed meanwhile. `reload` re-reads the record and starts with
//! an empty cache.

use crate::{
    core::{
        fillup::{get_fillups_for_vehicle, previous_fillup, require_fillup},
        metrics::{self, VehicleStats},
        vehicle::require_vehicle,
    },
    entities::{fillup, vehicle},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use tracing::debug;

/// A vehicle plus its lazily loaded fill-ups.
#[derive(Debug)]
pub struct LoadedVehicle {
    model: vehicle::Model,
    fillups: OnceCell<Vec<fillup::Model>>,
    stats: OnceCell<VehicleStats>,
}

impl LoadedVehicle {
    /// Wraps an already loaded model.
    #[must_use]
    pub fn new(model: vehicle::Model) -> Self {
        Self {
            model,
            fillups: OnceCell::new(),
            stats: OnceCell::new(),
        }
    }

    /// Reads the vehicle from the database.
    pub async fn load(db: &DatabaseConnection, vehicle_id: i64) -> Result<Self> {
        Ok(Self::new(require_vehicle(db, vehicle_id).await?))
    }

    /// Re-reads the vehicle, discarding every cached value.
    pub async fn reload(self, db: &DatabaseConnection) -> Result<Self> {
        Self::load(db, self.model.id).await
    }

    /// The stored vehicle.
    #[must_use]
    pub const fn model(&self) -> &vehicle::Model {
        &self.model
    }

    /// Fill-ups of this vehicle, oldest first. Queried once per instance.
    pub async fn fillups(&self, db: &DatabaseConnection) -> Result<&[fillup::Model]> {
        let fillups = self
            .fillups
            .get_or_try_init(|| async {
                debug!("Loading fill-ups for vehicle {}", self.model.id);
                get_fillups_for_vehicle(db, self.model.id).await
            })
            .await?;
        Ok(fillups)
    }

    /// Aggregate statistics, computed once per instance.
    pub async fn stats(&self, db: &DatabaseConnection) -> Result<&VehicleStats> {
        let fillups = self.fillups(db).await?;
        Ok(self
            .stats
            .get_or_init(|| async { VehicleStats::from_fillups(fillups) })
            .await)
    }

    /// Earliest fill-up.
    pub async fn first_fillup(&self, db: &DatabaseConnection) -> Result<Option<&fillup::Model>> {
        Ok(self.stats(db).await?.first_fillup.as_ref())
    }

    /// Miles between the first and last fill-up.
    pub async fn total_miles(&self, db: &DatabaseConnection) -> Result<Option<i64>> {
        Ok(self.stats(db).await?.total_miles)
    }

    /// Lifetime miles per gallon.
    pub async fn total_mpg(&self, db: &DatabaseConnection) -> Result<Option<Decimal>> {
        Ok(self.stats(db).await?.total_mpg)
    }
}

/// A fill-up plus its lazily loaded predecessor.
#[derive(Debug)]
pub struct LoadedFillup {
    model: fillup::Model,
    previous: OnceCell<Option<fillup::Model>>,
}

impl LoadedFillup {
    /// Wraps an already loaded model.
    #[must_use]
    pub fn new(model: fillup::Model) -> Self {
        Self {
            model,
            previous: OnceCell::new(),
        }
    }

    /// Reads the fill-up from the database.
    pub async fn load(db: &DatabaseConnection, fillup_id: i64) -> Result<Self> {
        Ok(Self::new(require_fillup(db, fillup_id).await?))
    }

    /// Re-reads the fill-up, discarding every cached value.
    pub async fn reload(self, db: &DatabaseConnection) -> Result<Self> {
        Self::load(db, self.model.id).await
    }

    /// The stored fill-up.
    #[must_use]
    pub const fn model(&self) -> &fillup::Model {
        &self.model
    }

    /// Gallons times price per gallon. Needs no query.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        metrics::total_cost(&self.model)
    }

    /// The previous fill-up of the same vehicle. Queried once per instance.
    pub async fn previous_fillup(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Option<&fillup::Model>> {
        let previous = self
            .previous
            .get_or_try_init(|| previous_fillup(db, &self.model))
            .await?;
        Ok(previous.as_ref())
    }

    /// Miles since the previous fill-up.
    pub async fn miles_driven(&self, db: &DatabaseConnection) -> Result<Option<i64>> {
        let previous = self.previous_fillup(db).await?;
        Ok(metrics::miles_driven(&self.model, previous))
    }

    /// Miles per gallon for this tank.
    pub async fn mpg(&self, db: &DatabaseConnection) -> Result<Option<Decimal>> {
        let previous = self.previous_fillup(db).await?;
        Ok(metrics::mpg(&self.model, previous))
    }
}
