use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use valuator_core::reference::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, ReferenceDataRepositoryTrait,
    SectorMetric, SizeAdjustment,
};
use valuator_core::Result;

use super::model::{
    ConcentrationAdjustmentDB, CountryAdjustmentDB, FxRateDB, SectorMetricDB, SizeAdjustmentDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{
    reference_concentration_adjustments, reference_country_adjustments, reference_fx_rates,
    reference_sector_metrics, reference_size_adjustments,
};

pub struct ReferenceDataRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReferenceDataRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ReferenceDataRepository { pool, writer }
    }
}

#[async_trait]
impl ReferenceDataRepositoryTrait for ReferenceDataRepository {
    fn get_fx_rate(&self, code: &str) -> Result<Option<f64>> {
        let mut conn = get_connection(&self.pool)?;
        reference_fx_rates::table
            .filter(reference_fx_rates::currency_code.eq(code))
            .select(reference_fx_rates::rate_to_eur)
            .first::<f64>(&mut conn)
            .optional()
            .into_core()
    }

    fn get_sector_multiple(&self, sector_label: &str) -> Result<Option<f64>> {
        let mut conn = get_connection(&self.pool)?;
        let multiple = reference_sector_metrics::table
            .filter(reference_sector_metrics::subsector_name_updated.eq(sector_label))
            .filter(reference_sector_metrics::base_ebit_multiple.is_not_null())
            .order(reference_sector_metrics::subsector_id.asc())
            .select(reference_sector_metrics::base_ebit_multiple)
            .first::<Option<f64>>(&mut conn)
            .optional()
            .into_core()?;
        Ok(multiple.flatten())
    }

    fn get_country_delta(&self, code: &str) -> Result<Option<f64>> {
        let mut conn = get_connection(&self.pool)?;
        reference_country_adjustments::table
            .filter(reference_country_adjustments::country_code.eq(code))
            .select(reference_country_adjustments::delta_multiple)
            .first::<f64>(&mut conn)
            .optional()
            .into_core()
    }

    fn get_fx_rates(&self) -> Result<Vec<FxRate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reference_fx_rates::table
            .order(reference_fx_rates::currency_code.asc())
            .select(FxRateDB::as_select())
            .load::<FxRateDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(FxRate::from).collect())
    }

    fn get_sector_metrics(&self) -> Result<Vec<SectorMetric>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reference_sector_metrics::table
            .order(reference_sector_metrics::subsector_id.asc())
            .select(SectorMetricDB::as_select())
            .load::<SectorMetricDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(SectorMetric::from).collect())
    }

    fn get_country_adjustments(&self) -> Result<Vec<CountryAdjustment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reference_country_adjustments::table
            .order(reference_country_adjustments::country_code.asc())
            .select(CountryAdjustmentDB::as_select())
            .load::<CountryAdjustmentDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CountryAdjustment::from).collect())
    }

    fn get_size_adjustments(&self) -> Result<Vec<SizeAdjustment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reference_size_adjustments::table
            .order(reference_size_adjustments::rev_min_eur.asc())
            .select(SizeAdjustmentDB::as_select())
            .load::<SizeAdjustmentDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(SizeAdjustment::from).collect())
    }

    fn get_concentration_adjustments(&self) -> Result<Vec<ConcentrationAdjustment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reference_concentration_adjustments::table
            .order(reference_concentration_adjustments::top3_min_pct.asc())
            .select(ConcentrationAdjustmentDB::as_select())
            .load::<ConcentrationAdjustmentDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(ConcentrationAdjustment::from).collect())
    }

    async fn insert_fx_rates(&self, rows: Vec<FxRate>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in rows {
                    inserted += diesel::insert_or_ignore_into(reference_fx_rates::table)
                        .values(FxRateDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn insert_sector_metrics(&self, rows: Vec<SectorMetric>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in rows {
                    inserted += diesel::insert_or_ignore_into(reference_sector_metrics::table)
                        .values(SectorMetricDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn insert_country_adjustments(&self, rows: Vec<CountryAdjustment>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in rows {
                    inserted += diesel::insert_or_ignore_into(reference_country_adjustments::table)
                        .values(CountryAdjustmentDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn insert_size_adjustments(&self, rows: Vec<SizeAdjustment>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in rows {
                    inserted += diesel::insert_or_ignore_into(reference_size_adjustments::table)
                        .values(SizeAdjustmentDB::from(row))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn insert_concentration_adjustments(
        &self,
        rows: Vec<ConcentrationAdjustment>,
    ) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in rows {
                    inserted +=
                        diesel::insert_or_ignore_into(reference_concentration_adjustments::table)
                            .values(ConcentrationAdjustmentDB::from(row))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }
}
