/// Database configuration and connection management
pub mod database;

/// Vehicle seed configuration from config.toml
pub mod vehicles;
