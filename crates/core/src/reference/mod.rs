//! Reference data module - lookup tables consumed by the valuation engine.

mod bracket_table;
mod reference_errors;
mod reference_import;
mod reference_model;
mod reference_service;
mod reference_traits;

pub use bracket_table::{Bracket, BracketTable};
pub use reference_errors::ReferenceImportError;
pub use reference_import::{
    read_concentration_adjustments, read_country_adjustments, read_fx_rates,
    read_sector_metrics, read_size_adjustments, ReferenceFile,
};
pub use reference_model::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, ReferenceImportSummary, SectorMetric,
    SizeAdjustment,
};
pub use reference_service::ReferenceDataService;
pub use reference_traits::{ReferenceDataRepositoryTrait, ReferenceDataServiceTrait};
