//! SQLite storage implementation for the reference lookup tables.

mod model;
mod repository;

pub use model::{
    ConcentrationAdjustmentDB, CountryAdjustmentDB, FxRateDB, SectorMetricDB, SizeAdjustmentDB,
};
pub use repository::ReferenceDataRepository;
