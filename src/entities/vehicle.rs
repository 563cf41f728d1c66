//! Vehicle entity - An owned vehicle whose fill-ups are tracked.
//!
//! Each vehicle has identifying attributes (year, make, model, color), an
//! optional nickname used for display, an owner, and free-form notes.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::timestamps::{Timestamped, TimestampedEntity, Timestamps, stamp};

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier for the vehicle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Manufacturer (e.g., "Honda")
    pub make: String,
    /// Model name (e.g., "Civic"); stored in the `model` column
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    /// Model year
    pub year: i32,
    /// Exterior color
    pub color: String,
    /// Friendly name; when empty the display name falls back to year/make/model
    pub nickname: String,
    /// Who owns the vehicle
    pub owner: String,
    /// Free-form notes, may be empty
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    /// When the vehicle was created
    pub created: DateTimeUtc,
    /// When the vehicle was last modified
    pub modified: DateTimeUtc,
}

impl Model {
    /// Name shown in lists and reports: the nickname, or `"year make model"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nickname.is_empty() {
            write!(f, "{} {} {}", self.year, self.make, self.model_name)
        } else {
            f.write_str(&self.nickname)
        }
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

/// Defines relationships between Vehicle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One vehicle has many fill-ups
    #[sea_orm(has_many = "super::fillup::Entity")]
    Fillups,
}

impl Related<super::fillup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fillups.def()
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
