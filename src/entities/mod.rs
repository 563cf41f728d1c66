//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod fillup;
pub mod timestamps;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use fillup::{Column as FillupColumn, Entity as Fillup, Model as FillupModel};
pub use timestamps::{Timestamped, TimestampedEntity, Timestamps};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel};
