use std::path::Path;

use super::bracket_table::BracketTable;
use super::reference_model::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, ReferenceImportSummary, SectorMetric,
    SizeAdjustment,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait defining the contract for reference table storage.
///
/// Point lookups return `Ok(None)` when no row matches; only store faults are
/// errors. Bracket lookups have default implementations on top of the
/// ordered table reads.
#[async_trait]
pub trait ReferenceDataRepositoryTrait: Send + Sync {
    fn get_fx_rate(&self, currency_code: &str) -> Result<Option<f64>>;
    fn get_sector_multiple(&self, sector_label: &str) -> Result<Option<f64>>;
    fn get_country_delta(&self, country_code: &str) -> Result<Option<f64>>;

    fn get_fx_rates(&self) -> Result<Vec<FxRate>>;
    fn get_sector_metrics(&self) -> Result<Vec<SectorMetric>>;
    fn get_country_adjustments(&self) -> Result<Vec<CountryAdjustment>>;
    /// Ascending by `rev_min_eur`.
    fn get_size_adjustments(&self) -> Result<Vec<SizeAdjustment>>;
    /// Ascending by `top3_min_pct`.
    fn get_concentration_adjustments(&self) -> Result<Vec<ConcentrationAdjustment>>;

    fn get_size_delta(&self, revenue_eur: f64) -> Result<Option<f64>> {
        Ok(BracketTable::from(self.get_size_adjustments()?).lookup(revenue_eur))
    }

    fn get_concentration_delta(&self, top3_pct: f64) -> Result<Option<f64>> {
        Ok(BracketTable::from(self.get_concentration_adjustments()?).lookup(top3_pct))
    }

    /// Inserts rows whose key is not present yet. Returns the number inserted.
    async fn insert_fx_rates(&self, rows: Vec<FxRate>) -> Result<usize>;
    async fn insert_sector_metrics(&self, rows: Vec<SectorMetric>) -> Result<usize>;
    async fn insert_country_adjustments(&self, rows: Vec<CountryAdjustment>) -> Result<usize>;
    async fn insert_size_adjustments(&self, rows: Vec<SizeAdjustment>) -> Result<usize>;
    async fn insert_concentration_adjustments(
        &self,
        rows: Vec<ConcentrationAdjustment>,
    ) -> Result<usize>;
}

/// Trait defining the contract for reference data service operations.
#[async_trait]
pub trait ReferenceDataServiceTrait: Send + Sync {
    fn get_fx_rates(&self) -> Result<Vec<FxRate>>;
    fn get_sector_metrics(&self) -> Result<Vec<SectorMetric>>;
    fn get_country_adjustments(&self) -> Result<Vec<CountryAdjustment>>;
    fn get_size_adjustments(&self) -> Result<Vec<SizeAdjustment>>;
    fn get_concentration_adjustments(&self) -> Result<Vec<ConcentrationAdjustment>>;
    async fn import_from_dir(&self, dir: &Path) -> Result<ReferenceImportSummary>;
}
