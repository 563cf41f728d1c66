//! Unified error type for the crate.
//!
//! Derived statistics never fail: a value that cannot be determined is `None`.
//! The variants here cover storage, configuration and lookup failures only.

use thiserror::Error;

/// Errors raised by database, configuration and lookup operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Error surfaced by `SeaORM` / the underlying driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No vehicle exists with the given ID
    #[error("Vehicle not found: {id}")]
    VehicleNotFound {
        /// The ID that was looked up
        id: i64,
    },

    /// No fill-up exists with the given ID
    #[error("Fill-up not found: {id}")]
    FillupNotFound {
        /// The ID that was looked up
        id: i64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
