use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::error;
use std::sync::Arc;

use valuator_core::valuations::{ValuationRepositoryTrait, ValuationResult};
use valuator_core::Result;

use super::model::ValuationResultDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::valuation_results;

pub struct ValuationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ValuationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ValuationRepository { pool, writer }
    }
}

#[async_trait]
impl ValuationRepositoryTrait for ValuationRepository {
    async fn save_result(&self, result: ValuationResult) -> Result<ValuationResult> {
        let row = ValuationResultDB::from(result);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ValuationResult> {
                let saved = diesel::insert_into(valuation_results::table)
                    .values(&row)
                    .returning(ValuationResultDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        error!("Failed to insert valuation result {}: {}", row.id, e);
                        StorageError::from(e)
                    })?;
                Ok(ValuationResult::from(saved))
            })
            .await
    }

    fn find_latest_by_company(&self, name: &str) -> Result<Option<ValuationResult>> {
        let mut conn = get_connection(&self.pool)?;
        let row = valuation_results::table
            .filter(valuation_results::company_name.eq(name))
            .order((
                valuation_results::created_at.desc(),
                valuation_results::id.desc(),
            ))
            .select(ValuationResultDB::as_select())
            .first::<ValuationResultDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(ValuationResult::from))
    }
}
