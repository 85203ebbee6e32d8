//! SQLite storage implementation for valuation results.

mod model;
mod repository;

pub use model::ValuationResultDB;
pub use repository::ValuationRepository;
