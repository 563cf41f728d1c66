//! Vehicle business logic - Handles all vehicle-related operations.
//!
//! Provides functions for creating, retrieving, updating, listing and deleting
//! vehicles, seeding them from configuration, and computing their aggregate
//! fuel statistics. All functions are async and return Result types.

use crate::{
    config::vehicles::VehicleConfig,
    core::{fillup::get_fillups_for_vehicle, metrics::VehicleStats},
    entities::{Fillup, Vehicle, fillup, vehicle},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Fields needed to create a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVehicle {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: i32,
    /// Exterior color
    pub color: String,
    /// Display nickname (may be empty)
    pub nickname: String,
    /// Owner; cannot be changed afterwards
    pub owner: String,
    /// Free-form notes
    pub notes: String,
}

impl From<&VehicleConfig> for NewVehicle {
    fn from(cfg: &VehicleConfig) -> Self {
        Self {
            make: cfg.make.clone(),
            model: cfg.model.clone(),
            year: cfg.year,
            color: cfg.color.clone(),
            nickname: cfg.nickname.clone(),
            owner: cfg.owner.clone(),
            notes: cfg.notes.clone(),
        }
    }
}

/// Editable vehicle fields. `None` leaves a field untouched; the owner is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleChanges {
    /// New manufacturer
    pub make: Option<String>,
    /// New model name
    pub model: Option<String>,
    /// New model year
    pub year: Option<i32>,
    /// New color
    pub color: Option<String>,
    /// New nickname
    pub nickname: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// Filters for [`list_vehicles`]. Empty means "all vehicles".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleQuery {
    /// Exact model year
    pub year: Option<i32>,
    /// Exact make
    pub make: Option<String>,
    /// Exact model name
    pub model: Option<String>,
    /// Exact owner
    pub owner: Option<String>,
    /// Substring matched against make, model, nickname and owner
    pub search: Option<String>,
}

/// Inserts a new vehicle. `created`/`modified` are stamped by the entity.
pub async fn create_vehicle(db: &DatabaseConnection, new: NewVehicle) -> Result<vehicle::Model> {
    let vehicle = vehicle::ActiveModel {
        make: Set(new.make),
        model_name: Set(new.model),
        year: Set(new.year),
        color: Set(new.color),
        nickname: Set(new.nickname),
        owner: Set(new.owner),
        notes: Set(new.notes),
        ..Default::default()
    };

    let result = vehicle.insert(db).await?;
    info!("Created vehicle {} ({})", result.id, result);
    Ok(result)
}

/// Finds a vehicle by its unique ID.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_vehicle_by_id`] but a missing vehicle is an error.
pub async fn require_vehicle(db: &DatabaseConnection, vehicle_id: i64) -> Result<vehicle::Model> {
    get_vehicle_by_id(db, vehicle_id)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })
}

/// Applies `changes` to an existing vehicle and refreshes its `modified` stamp.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
    changes: VehicleChanges,
) -> Result<vehicle::Model> {
    let mut vehicle: vehicle::ActiveModel = require_vehicle(db, vehicle_id).await?.into();

    if let Some(make) = changes.make {
        vehicle.make = Set(make);
    }
    if let Some(model) = changes.model {
        vehicle.model_name = Set(model);
    }
    if let Some(year) = changes.year {
        vehicle.year = Set(year);
    }
    if let Some(color) = changes.color {
        vehicle.color = Set(color);
    }
    if let Some(nickname) = changes.nickname {
        vehicle.nickname = Set(nickname);
    }
    if let Some(notes) = changes.notes {
        vehicle.notes = Set(notes);
    }

    vehicle.update(db).await.map_err(Into::into)
}

/// Deletes a vehicle together with all of its fill-ups.
pub async fn delete_vehicle(db: &DatabaseConnection, vehicle_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let vehicle = Vehicle::find_by_id(vehicle_id)
        .one(&txn)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })?;

    let removed = Fillup::delete_many()
        .filter(fillup::Column::VehicleId.eq(vehicle_id))
        .exec(&txn)
        .await?;
    vehicle.delete(&txn).await?;

    txn.commit().await?;
    info!(
        "Deleted vehicle {vehicle_id} and {} fill-ups",
        removed.rows_affected
    );
    Ok(())
}

/// Lists vehicles ordered by year, make and model, narrowed by `query`.
pub async fn list_vehicles(
    db: &DatabaseConnection,
    query: &VehicleQuery,
) -> Result<Vec<vehicle::Model>> {
    let mut select = Vehicle::find();

    if let Some(year) = query.year {
        select = select.filter(vehicle::Column::Year.eq(year));
    }
    if let Some(make) = &query.make {
        select = select.filter(vehicle::Column::Make.eq(make.as_str()));
    }
    if let Some(model) = &query.model {
        select = select.filter(vehicle::Column::ModelName.eq(model.as_str()));
    }
    if let Some(owner) = &query.owner {
        select = select.filter(vehicle::Column::Owner.eq(owner.as_str()));
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(vehicle::Column::Make.contains(term))
                .add(vehicle::Column::ModelName.contains(term))
                .add(vehicle::Column::Nickname.contains(term))
                .add(vehicle::Column::Owner.contains(term)),
        );
    }

    let vehicles = select
        .order_by_asc(vehicle::Column::Year)
        .order_by_asc(vehicle::Column::Make)
        .order_by_asc(vehicle::Column::ModelName)
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await?;
    debug!("Listed {} vehicles for {:?}", vehicles.len(), query);
    Ok(vehicles)
}

/// Inserts every configured vehicle that is not stored yet.
///
/// A vehicle counts as stored when year, make, model, owner and nickname all
/// match. Returns the vehicles that were inserted.
pub async fn seed_vehicles(
    db: &DatabaseConnection,
    configs: &[VehicleConfig],
) -> Result<Vec<vehicle::Model>> {
    let mut inserted = Vec::new();

    for cfg in configs {
        let existing = Vehicle::find()
            .filter(vehicle::Column::Year.eq(cfg.year))
            .filter(vehicle::Column::Make.eq(cfg.make.as_str()))
            .filter(vehicle::Column::ModelName.eq(cfg.model.as_str()))
            .filter(vehicle::Column::Owner.eq(cfg.owner.as_str()))
            .filter(vehicle::Column::Nickname.eq(cfg.nickname.as_str()))
            .one(db)
            .await?;

        if existing.is_some() {
            debug!(
                "Vehicle {} {} {} for {} already exists, skipping",
                cfg.year, cfg.make, cfg.model, cfg.owner
            );
            continue;
        }

        inserted.push(create_vehicle(db, NewVehicle::from(cfg)).await?);
    }

    info!(
        "Seeded {} of {} configured vehicles",
        inserted.len(),
        configs.len()
    );
    Ok(inserted)
}

/// Computes aggregate statistics for a vehicle from its stored fill-ups.
pub async fn vehicle_stats(db: &DatabaseConnection, vehicle_id: i64) -> Result<VehicleStats> {
    require_vehicle(db, vehicle_id).await?;
    let fillups = get_fillups_for_vehicle(db, vehicle_id).await?;
    Ok(VehicleStats::from_fillups(&fillups))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_vehicle_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let vehicle = create_test_vehicle(&db, "Old Faithful").await?;

        assert_eq!(vehicle.nickname, "Old Faithful");
        assert_eq!(vehicle.make, "Toyota");
        assert_eq!(vehicle.created, vehicle.modified);

        let found = get_vehicle_by_id(&db, vehicle.id).await?;
        assert_eq!(found, Some(vehicle));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_vehicle_keeps_created_and_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "").await?;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = update_vehicle(
            &db,
            vehicle.id,
            VehicleChanges {
                nickname: Some("Rocket".to_string()),
                color: Some("Red".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.nickname, "Rocket");
        assert_eq!(updated.color, "Red");
        assert_eq!(updated.owner, vehicle.owner);
        assert_eq!(updated.created, vehicle.created);
        assert!(updated.modified > vehicle.modified);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_vehicle() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_vehicle(&db, 999, VehicleChanges::default()).await;
        assert!(matches!(result, Err(Error::VehicleNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_vehicle_removes_fillups() -> Result<()> {
        let (db, vehicle, _fillups) = setup_with_fillups().await?;

        delete_vehicle(&db, vehicle.id).await?;

        assert!(get_vehicle_by_id(&db, vehicle.id).await?.is_none());
        assert!(get_fillups_for_vehicle(&db, vehicle.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_vehicles_ordering_filters_and_search() -> Result<()> {
        let db = setup_test_db().await?;
        let civic = create_custom_vehicle(&db, "Honda", "Civic", 2015, "Bluebird", "alex").await?;
        let truck = create_custom_vehicle(&db, "Ford", "F-150", 2019, "", "jordan").await?;
        let accord = create_custom_vehicle(&db, "Honda", "Accord", 2015, "", "jordan").await?;

        let all = list_vehicles(&db, &VehicleQuery::default()).await?;
        let ids: Vec<i64> = all.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![accord.id, civic.id, truck.id]);

        let jordans = list_vehicles(
            &db,
            &VehicleQuery {
                owner: Some("jordan".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(jordans.len(), 2);

        let year_2015 = list_vehicles(
            &db,
            &VehicleQuery {
                year: Some(2015),
                make: Some("Honda".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(year_2015.len(), 2);

        let searched = list_vehicles(
            &db,
            &VehicleQuery {
                search: Some("bird".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(searched, vec![civic]);

        let blank_search = list_vehicles(
            &db,
            &VehicleQuery {
                search: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(blank_search.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_vehicles_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        let configs = vec![
            VehicleConfig {
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2015,
                color: "Blue".to_string(),
                nickname: "Bluebird".to_string(),
                owner: "alex".to_string(),
                notes: String::new(),
            },
            VehicleConfig {
                make: "Ford".to_string(),
                model: "F-150".to_string(),
                year: 2019,
                color: String::new(),
                nickname: String::new(),
                owner: "alex".to_string(),
                notes: String::new(),
            },
        ];

        let first = seed_vehicles(&db, &configs).await?;
        assert_eq!(first.len(), 2);

        let second = seed_vehicles(&db, &configs).await?;
        assert!(second.is_empty());

        let all = list_vehicles(&db, &VehicleQuery::default()).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_vehicle_stats_without_fillups() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "Empty").await?;

        let stats = vehicle_stats(&db, vehicle.id).await?;
        assert!(stats.first_fillup.is_none());
        assert!(stats.total_miles.is_none());
        assert!(stats.total_mpg.is_none());
        assert_eq!(stats.fillup_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_vehicle_stats_single_fillup() -> Result<()> {
        let db = setup_test_db().await?;
        let vehicle = create_test_vehicle(&db, "Solo").await?;
        create_test_fillup(&db, vehicle.id, date(2024, 1, 1), 1000, Decimal::from(10)).await?;

        let stats = vehicle_stats(&db, vehicle.id).await?;
        assert_eq!(stats.total_miles, Some(0));
        assert_eq!(stats.total_mpg, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_vehicle_stats_integration() -> Result<()> {
        let (db, vehicle, fillups) = setup_with_fillups().await?;

        let stats = vehicle_stats(&db, vehicle.id).await?;
        assert_eq!(stats.first_fillup.unwrap().id, fillups[0].id);
        assert_eq!(stats.total_miles, Some(800));
        assert_eq!(stats.fillup_count, 3);
        assert_eq!(
            stats.total_mpg,
            Some(Decimal::from(800) / Decimal::from(36))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_vehicle_stats_missing_vehicle() -> Result<()> {
        let db = setup_test_db().await?;
        let result = vehicle_stats(&db, 42).await;
        assert!(matches!(result, Err(Error::VehicleNotFound { id: 42 })));
        Ok(())
    }
}
