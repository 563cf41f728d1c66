use fillup_buddy::{
    config::{database, vehicles},
    core::{
        report::{format_vehicle_report, generate_vehicle_report},
        vehicle::{VehicleQuery, list_vehicles, seed_vehicles},
    },
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Vehicle seed configuration (optional file)
    let config = vehicles::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed configured vehicles
    seed_vehicles(&db, &config.vehicles).await?;

    // 6. Print a report per vehicle
    let fleet = list_vehicles(&db, &VehicleQuery::default()).await?;
    if fleet.is_empty() {
        info!("No vehicles recorded yet.");
    }
    for vehicle in fleet {
        let report = generate_vehicle_report(&db, vehicle.id, None).await?;
        println!("{}", format_vehicle_report(&report));
    }

    Ok(())
}
