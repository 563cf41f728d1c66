//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.
#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        fillup::{self, NewFillup},
        vehicle::{self, NewVehicle},
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a test vehicle with sensible defaults.
///
/// # Defaults
/// * 2012 Toyota Corolla, silver
/// * `owner`: `"sam"`
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    nickname: &str,
) -> Result<entities::vehicle::Model> {
    create_custom_vehicle(db, "Toyota", "Corolla", 2012, nickname, "sam").await
}

/// Creates a test vehicle with custom identifying fields.
pub async fn create_custom_vehicle(
    db: &DatabaseConnection,
    make: &str,
    model: &str,
    year: i32,
    nickname: &str,
    owner: &str,
) -> Result<entities::vehicle::Model> {
    vehicle::create_vehicle(
        db,
        NewVehicle {
            make: make.to_string(),
            model: model.to_string(),
            year,
            color: "Silver".to_string(),
            nickname: nickname.to_string(),
            owner: owner.to_string(),
            notes: String::new(),
        },
    )
    .await
}

/// A fill-up form with sensible defaults.
///
/// # Defaults
/// * `gallons`: 10
/// * `price_per_gallon`: 3.000
/// * `station`: `"Shell"`, `location`: `"Main St"`
pub fn new_fillup(vehicle_id: i64, date: NaiveDate, odometer: i32) -> NewFillup {
    NewFillup {
        vehicle_id,
        date,
        odometer,
        gallons: Decimal::from(10),
        price_per_gallon: Decimal::new(3000, 3),
        station: "Shell".to_string(),
        location: "Main St".to_string(),
        notes: String::new(),
    }
}

/// Creates a test fill-up with the given reading and gallons.
pub async fn create_test_fillup(
    db: &DatabaseConnection,
    vehicle_id: i64,
    date: NaiveDate,
    odometer: i32,
    gallons: Decimal,
) -> Result<entities::fillup::Model> {
    let mut new = new_fillup(vehicle_id, date, odometer);
    new.gallons = gallons;
    fillup::create_fillup(db, new).await
}

/// Sets up a vehicle with three fill-ups:
/// (2024-01-01, 1000, 10 gal), (2024-01-15, 1400, 14 gal), (2024-02-01, 1800, 12 gal).
/// Returns (db, vehicle, fill-ups oldest first).
pub async fn setup_with_fillups() -> Result<(
    DatabaseConnection,
    entities::vehicle::Model,
    Vec<entities::fillup::Model>,
)> {
    let db = setup_test_db().await?;
    let vehicle = create_test_vehicle(&db, "Old Faithful").await?;
    let fillups = vec![
        create_test_fillup(&db, vehicle.id, date(2024, 1, 1), 1000, Decimal::from(10)).await?,
        create_test_fillup(&db, vehicle.id, date(2024, 1, 15), 1400, Decimal::from(14)).await?,
        create_test_fillup(&db, vehicle.id, date(2024, 2, 1), 1800, Decimal::from(12)).await?,
    ];
    Ok((db, vehicle, fillups))
}
