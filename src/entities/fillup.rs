//! Fill-up entity - A single refueling event for one vehicle.
//!
//! Each fill-up records the date, odometer reading, gallons purchased and the
//! price per gallon, plus where it happened. Gallons and price are fixed-point
//! decimals with three places.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::timestamps::{Timestamped, TimestampedEntity, Timestamps, stamp};

/// Fill-up database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fillups")]
pub struct Model {
    /// Unique identifier for the fill-up
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the vehicle that was filled
    pub vehicle_id: i64,
    /// Calendar date of the fill-up
    pub date: Date,
    /// Odometer reading at the pump
    pub odometer: i32,
    /// Gallons purchased
    #[sea_orm(column_type = "Decimal(Some((5, 3)))")]
    pub gallons: Decimal,
    /// Price paid per gallon
    #[sea_orm(column_type = "Decimal(Some((5, 3)))")]
    pub price_per_gallon: Decimal,
    /// Station name (e.g., "Shell")
    pub station: String,
    /// Where the station is
    pub location: String,
    /// Free-form notes, may be empty
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    /// When the fill-up was created
    pub created: DateTimeUtc,
    /// When the fill-up was last modified
    pub modified: DateTimeUtc,
}

impl Model {
    /// `"<vehicle> @ <odometer> on <date>"`, e.g. `"Old Faithful @ 1400 on 2024-01-15"`.
    #[must_use]
    pub fn label(&self, vehicle: &super::vehicle::Model) -> String {
        format!("{vehicle} @ {} on {}", self.odometer, self.date)
    }
}

impl Timestamped for Model {
    fn timestamps(&self) -> Timestamps {
        Timestamps {
            created: self.created,
            modified: self.modified,
        }
    }
}

impl TimestampedEntity for Entity {
    fn created_column() -> Column {
        Column::Created
    }
}

/// Defines relationships between Fill-up and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fill-up belongs to one vehicle; deleting the vehicle removes it
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id",
        on_delete = "Cascade"
    )]
    Vehicle,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        stamp(&mut self.created, &mut self.modified, insert);
        Ok(self)
    }
}
