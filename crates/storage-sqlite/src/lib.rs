//! SQLite storage implementation for the valuation engine.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `valuator-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for reference data and valuation results
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod reference;
pub mod valuations;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from valuator-core for convenience
pub use valuator_core::errors::{DatabaseError, Error, Result};
