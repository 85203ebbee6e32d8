//! Valuator Core - Domain entities, services, and traits.
//!
//! This crate contains the valuation engine and the reference-data model it
//! reads from. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod reference;
pub mod utils;
pub mod valuations;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
