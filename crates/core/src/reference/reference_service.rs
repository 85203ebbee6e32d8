use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use super::reference_errors::ReferenceImportError;
use super::reference_import::{
    read_concentration_adjustments, read_country_adjustments, read_fx_rates,
    read_sector_metrics, read_size_adjustments, ReferenceFile,
};
use super::reference_model::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, ReferenceImportSummary, SectorMetric,
    SizeAdjustment,
};
use super::reference_traits::{ReferenceDataRepositoryTrait, ReferenceDataServiceTrait};
use crate::errors::Result;

#[derive(Clone)]
pub struct ReferenceDataService {
    repository: Arc<dyn ReferenceDataRepositoryTrait>,
}

impl ReferenceDataService {
    pub fn new(repository: Arc<dyn ReferenceDataRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Opens one file of the export, or `None` when it is not there.
    fn open(dir: &Path, file: ReferenceFile) -> Result<Option<(BufReader<File>, String)>> {
        let path = dir.join(file.file_name());
        let source = path.display().to_string();
        if !path.exists() {
            warn!("Reference file {} not found, table left unchanged", source);
            return Ok(None);
        }
        let handle = File::open(&path).map_err(|e| ReferenceImportError::Io {
            path: source.clone(),
            message: e.to_string(),
        })?;
        Ok(Some((BufReader::new(handle), source)))
    }
}

#[async_trait]
impl ReferenceDataServiceTrait for ReferenceDataService {
    fn get_fx_rates(&self) -> Result<Vec<FxRate>> {
        self.repository.get_fx_rates()
    }

    fn get_sector_metrics(&self) -> Result<Vec<SectorMetric>> {
        self.repository.get_sector_metrics()
    }

    fn get_country_adjustments(&self) -> Result<Vec<CountryAdjustment>> {
        self.repository.get_country_adjustments()
    }

    fn get_size_adjustments(&self) -> Result<Vec<SizeAdjustment>> {
        self.repository.get_size_adjustments()
    }

    fn get_concentration_adjustments(&self) -> Result<Vec<ConcentrationAdjustment>> {
        self.repository.get_concentration_adjustments()
    }

    async fn import_from_dir(&self, dir: &Path) -> Result<ReferenceImportSummary> {
        info!("Importing reference data from {}", dir.display());
        let mut summary = ReferenceImportSummary::default();

        for file in ReferenceFile::ALL {
            let Some((reader, source)) = Self::open(dir, file)? else {
                continue;
            };
            let inserted = match file {
                ReferenceFile::FxRates => {
                    let rows = read_fx_rates(reader, &source)?;
                    self.repository.insert_fx_rates(rows).await?
                }
                ReferenceFile::SectorMetrics => {
                    let rows = read_sector_metrics(reader, &source)?;
                    self.repository.insert_sector_metrics(rows).await?
                }
                ReferenceFile::CountryAdjustments => {
                    let rows = read_country_adjustments(reader, &source)?;
                    self.repository.insert_country_adjustments(rows).await?
                }
                ReferenceFile::SizeAdjustments => {
                    let rows = read_size_adjustments(reader, &source)?;
                    self.repository.insert_size_adjustments(rows).await?
                }
                ReferenceFile::ConcentrationAdjustments => {
                    let rows = read_concentration_adjustments(reader, &source)?;
                    self.repository.insert_concentration_adjustments(rows).await?
                }
            };

            info!("Inserted {} rows from {}", inserted, source);
            match file {
                ReferenceFile::FxRates => summary.fx_rates = inserted,
                ReferenceFile::SectorMetrics => summary.sector_metrics = inserted,
                ReferenceFile::CountryAdjustments => summary.country_adjustments = inserted,
                ReferenceFile::SizeAdjustments => summary.size_adjustments = inserted,
                ReferenceFile::ConcentrationAdjustments => {
                    summary.concentration_adjustments = inserted
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockReferenceRepository {
        fx_rates: RwLock<Vec<FxRate>>,
        sectors: RwLock<Vec<SectorMetric>>,
        countries: RwLock<Vec<CountryAdjustment>>,
        sizes: RwLock<Vec<SizeAdjustment>>,
        concentrations: RwLock<Vec<ConcentrationAdjustment>>,
    }

    #[async_trait]
    impl ReferenceDataRepositoryTrait for MockReferenceRepository {
        fn get_fx_rate(&self, currency_code: &str) -> Result<Option<f64>> {
            Ok(self
                .fx_rates
                .read()
                .unwrap()
                .iter()
                .find(|r| r.currency_code == currency_code)
                .map(|r| r.rate_to_eur))
        }
        fn get_sector_multiple(&self, _: &str) -> Result<Option<f64>> {
            unimplemented!()
        }
        fn get_country_delta(&self, _: &str) -> Result<Option<f64>> {
            unimplemented!()
        }
        fn get_fx_rates(&self) -> Result<Vec<FxRate>> {
            Ok(self.fx_rates.read().unwrap().clone())
        }
        fn get_sector_metrics(&self) -> Result<Vec<SectorMetric>> {
            Ok(self.sectors.read().unwrap().clone())
        }
        fn get_country_adjustments(&self) -> Result<Vec<CountryAdjustment>> {
            Ok(self.countries.read().unwrap().clone())
        }
        fn get_size_adjustments(&self) -> Result<Vec<SizeAdjustment>> {
            Ok(self.sizes.read().unwrap().clone())
        }
        fn get_concentration_adjustments(&self) -> Result<Vec<ConcentrationAdjustment>> {
            Ok(self.concentrations.read().unwrap().clone())
        }
        async fn insert_fx_rates(&self, rows: Vec<FxRate>) -> Result<usize> {
            let mut table = self.fx_rates.write().unwrap();
            let mut inserted = 0;
            for row in rows {
                if !table.iter().any(|r| r.currency_code == row.currency_code) {
                    table.push(row);
                    inserted += 1;
                }
            }
            Ok(inserted)
        }
        async fn insert_sector_metrics(&self, rows: Vec<SectorMetric>) -> Result<usize> {
            let n = rows.len();
            self.sectors.write().unwrap().extend(rows);
            Ok(n)
        }
        async fn insert_country_adjustments(&self, rows: Vec<CountryAdjustment>) -> Result<usize> {
            let n = rows.len();
            self.countries.write().unwrap().extend(rows);
            Ok(n)
        }
        async fn insert_size_adjustments(&self, rows: Vec<SizeAdjustment>) -> Result<usize> {
            let n = rows.len();
            self.sizes.write().unwrap().extend(rows);
            Ok(n)
        }
        async fn insert_concentration_adjustments(
            &self,
            rows: Vec<ConcentrationAdjustment>,
        ) -> Result<usize> {
            let n = rows.len();
            self.concentrations.write().unwrap().extend(rows);
            Ok(n)
        }
    }

    #[tokio::test]
    async fn test_import_from_dir_with_partial_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fx_rates.csv"),
            "Currency,RateToEUR\nUSD,0.93\nGBP,1.17\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("size_adjustments.csv"),
            "RevMin_EUR,DeltaMultiple\n\"2,000,000\",-1\n\"50,000,000\",0\n\"1,000,000,000\",0.6\n",
        )
        .unwrap();

        let repo = Arc::new(MockReferenceRepository::default());
        let service = ReferenceDataService::new(repo.clone());
        let summary = service.import_from_dir(dir.path()).await.unwrap();

        assert_eq!(summary.fx_rates, 2);
        assert_eq!(summary.size_adjustments, 3);
        assert_eq!(summary.sector_metrics, 0);
        assert_eq!(summary.total(), 5);
        assert_eq!(repo.get_fx_rate("USD").unwrap(), Some(0.93));
        assert_eq!(repo.get_size_delta(60_000_000.0).unwrap(), Some(0.6));
        assert_eq!(repo.get_concentration_delta(25.0).unwrap(), None);
    }

    #[tokio::test]
    async fn test_reimport_keeps_existing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MockReferenceRepository::default());
        let service = ReferenceDataService::new(repo.clone());

        std::fs::write(dir.path().join("fx_rates.csv"), "Currency,RateToEUR\nUSD,0.93\n").unwrap();
        service.import_from_dir(dir.path()).await.unwrap();

        std::fs::write(
            dir.path().join("fx_rates.csv"),
            "Currency,RateToEUR\nUSD,0.99\nJPY,0.0062\n",
        )
        .unwrap();
        let summary = service.import_from_dir(dir.path()).await.unwrap();

        assert_eq!(summary.fx_rates, 1);
        assert_eq!(service.get_fx_rates().unwrap().len(), 2);
        assert_eq!(repo.get_fx_rate("USD").unwrap(), Some(0.93));
    }

    #[tokio::test]
    async fn test_malformed_file_aborts_import() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("country_adjustments.csv"), "Country,Delta\nUS,0.2\n")
            .unwrap();
        let service = ReferenceDataService::new(Arc::new(MockReferenceRepository::default()));
        assert!(service.import_from_dir(dir.path()).await.is_err());
    }
}
