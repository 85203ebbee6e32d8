use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

use super::valuations_calculator::{
    adjusted_multiple, format_ev_band, growth_ratios, historical_averages, project_ev,
};
use super::valuations_model::{
    CalculatedMetrics, EvBasis, HistoricalAverages, MultipleFactors, TestCalculation,
    ValuationInput, ValuationResult,
};
use super::valuations_traits::{ValuationRepositoryTrait, ValuationServiceTrait};
use crate::constants::DEFAULT_FX_RATE;
use crate::errors::{Result, ValidationError};
use crate::reference::ReferenceDataRepositoryTrait;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Clone)]
pub struct ValuationService {
    reference_repository: Arc<dyn ReferenceDataRepositoryTrait>,
    valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    ev_basis: EvBasis,
}

impl ValuationService {
    pub fn new(
        reference_repository: Arc<dyn ReferenceDataRepositoryTrait>,
        valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    ) -> Self {
        Self {
            reference_repository,
            valuation_repository,
            ev_basis: EvBasis::default(),
        }
    }

    fn resolve_fx_rate(&self, currency_code: Option<&str>) -> Result<f64> {
        let Some(code) = currency_code else {
            warn!("Currency code missing, defaulting FX rate to {}", DEFAULT_FX_RATE);
            return Ok(DEFAULT_FX_RATE);
        };
        match self.reference_repository.get_fx_rate(code)? {
            Some(rate) => Ok(rate),
            None => {
                warn!(
                    "FX rate not found for currency: {}, defaulting to {}",
                    code, DEFAULT_FX_RATE
                );
                Ok(DEFAULT_FX_RATE)
            }
        }
    }

    fn resolve_factors(
        &self,
        input: &ValuationInput,
        averages: &HistoricalAverages,
    ) -> Result<MultipleFactors> {
        let base_multiple = match non_empty(&input.sector) {
            Some(sector) => {
                let multiple = self.reference_repository.get_sector_multiple(sector)?;
                if multiple.is_none() {
                    warn!("Base multiple not found for sector: {}", sector);
                }
                multiple
            }
            None => {
                warn!("Sector missing, base multiple left empty");
                None
            }
        };

        let country_risk = match non_empty(&input.country_code) {
            Some(code) => self
                .reference_repository
                .get_country_delta(code)?
                .unwrap_or_else(|| {
                    warn!("Country risk not found for country: {}, defaulting to 0.0", code);
                    0.0
                }),
            None => 0.0,
        };

        let size_adj = self
            .reference_repository
            .get_size_delta(averages.rev_avg_eur as f64)?
            .unwrap_or_else(|| {
                warn!("Size adjustment table is empty, defaulting to 0.0");
                0.0
            });

        let conc_adj = match input.top3_concentration_pct {
            Some(pct) => self
                .reference_repository
                .get_concentration_delta(pct)?
                .unwrap_or_else(|| {
                    warn!("Concentration adjustment table is empty, defaulting to 0.0");
                    0.0
                }),
            None => 0.0,
        };

        Ok(MultipleFactors {
            base_multiple,
            country_risk,
            size_adj,
            conc_adj,
        })
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    fn calculate_metrics(&self, input: &ValuationInput) -> Result<CalculatedMetrics> {
        let fx_rate = self.resolve_fx_rate(non_empty(&input.currency_code))?;
        let averages = historical_averages(input, fx_rate);
        let ratios = growth_ratios(input, &averages);
        let factors = self.resolve_factors(input, &averages)?;
        let adj_multiple = adjusted_multiple(&factors);

        let (val_ev_low_eur, val_ev_mid_eur, val_ev_high_eur) =
            match project_ev(input.ebit_y3, input.ebit_f1, fx_rate, self.ev_basis) {
                Some(band) => {
                    let [low, mid, high] = format_ev_band(&band);
                    (Some(low), Some(mid), Some(high))
                }
                None => (None, None, None),
            };

        debug!(
            "Calculated metrics for {:?}: fx={} rev_avg={} adj_multiple={:?}",
            input.company_name, fx_rate, averages.rev_avg_eur, adj_multiple
        );

        Ok(CalculatedMetrics {
            calc_fx_rate: fx_rate,
            calc_rev_avg_eur: averages.rev_avg_eur,
            calc_ebit_avg_eur: averages.ebit_avg_eur,
            calc_ebit_margin_pct: ratios.ebit_margin_pct,
            calc_ebit_cagr_pct: ratios.ebit_cagr_pct,
            calc_volatility_pct: ratios.volatility_pct,
            calc_rev_cagr_pct: ratios.rev_cagr_pct,
            factor_base_multiple: factors.base_multiple,
            factor_country_risk: factors.country_risk,
            factor_size_adj: factors.size_adj,
            factor_conc_adj: factors.conc_adj,
            factor_adj_multiple: adj_multiple,
            val_ev_low_eur,
            val_ev_mid_eur,
            val_ev_high_eur,
        })
    }

    async fn create_valuation(&self, input: ValuationInput) -> Result<ValuationResult> {
        if input.company_name().is_none() {
            return Err(ValidationError::MissingField("company_name".to_string()).into());
        }

        let metrics = self.calculate_metrics(&input)?;
        let result = ValuationResult {
            id: Uuid::now_v7().to_string(),
            input,
            metrics,
            created_at: Utc::now().naive_utc(),
        };

        let saved = self.valuation_repository.save_result(result).await?;
        info!(
            "Created valuation {} for {}",
            saved.id,
            saved.input.company_name.as_deref().unwrap_or_default()
        );
        Ok(saved)
    }

    fn get_valuation(&self, company_name: &str) -> Result<Option<ValuationResult>> {
        self.valuation_repository.find_latest_by_company(company_name)
    }

    fn run_test_calculation(&self) -> Result<TestCalculation> {
        let input = ValuationInput::reference_fixture();
        let calculated_metrics = self.calculate_metrics(&input)?;
        Ok(TestCalculation {
            input,
            calculated_metrics,
        })
    }
}
