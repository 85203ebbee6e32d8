use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use valuator_core::{
    reference::{ReferenceDataService, ReferenceDataServiceTrait},
    valuations::{ValuationService, ValuationServiceTrait},
};
use valuator_storage_sqlite::{
    db::{self, write_actor},
    reference::ReferenceDataRepository,
    valuations::ValuationRepository,
};

pub struct AppState {
    pub valuation_service: Arc<dyn ValuationServiceTrait + Send + Sync>,
    pub reference_service: Arc<dyn ReferenceDataServiceTrait + Send + Sync>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer(pool.clone());

    let reference_repo = Arc::new(ReferenceDataRepository::new(pool.clone(), writer.clone()));
    let valuation_repo = Arc::new(ValuationRepository::new(pool, writer));

    let reference_service = Arc::new(ReferenceDataService::new(reference_repo.clone()));
    if let Some(dir) = &config.reference_dir {
        let summary = reference_service.import_from_dir(dir).await?;
        tracing::info!(
            "Seeded {} reference rows from {} (fx={}, sectors={}, countries={}, size={}, concentration={})",
            summary.total(),
            dir.display(),
            summary.fx_rates,
            summary.sector_metrics,
            summary.country_adjustments,
            summary.size_adjustments,
            summary.concentration_adjustments
        );
    }

    let valuation_service = Arc::new(ValuationService::new(reference_repo, valuation_repo));

    Ok(Arc::new(AppState {
        valuation_service,
        reference_service,
    }))
}
