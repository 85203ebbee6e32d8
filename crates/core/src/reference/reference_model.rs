//! Reference table domain models.

use serde::{Deserialize, Serialize};

/// Conversion rate from a currency into EUR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FxRate {
    pub currency_code: String,
    pub rate_to_eur: f64,
}

/// Sector metrics row. Only `base_ebit_multiple` feeds the engine; the
/// remaining columns are carried so the table can be listed as imported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorMetric {
    pub subsector_id: String,
    pub sector_id: Option<String>,
    pub sector_en: Option<String>,
    pub sector_de: Option<String>,
    pub subsector_en: Option<String>,
    pub subsector_de: Option<String>,
    /// Label matched (exactly) against the request's sector.
    pub subsector_name_updated: Option<String>,
    pub base_ebit_multiple: Option<f64>,
    pub target_ebit_margin_pct: Option<f64>,
    pub target_cagr_pct: Option<f64>,
    pub band_min: Option<f64>,
}

/// Additive multiple adjustment for a country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryAdjustment {
    pub country_code: String,
    pub delta_multiple: f64,
}

/// Size bracket keyed on the EUR revenue average.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeAdjustment {
    pub rev_min_eur: f64,
    pub delta_multiple: f64,
}

/// Concentration bracket keyed on the top-3 customer share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConcentrationAdjustment {
    pub top3_min_pct: f64,
    pub delta_multiple: f64,
}

/// Rows inserted per table by a reference import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceImportSummary {
    pub fx_rates: usize,
    pub sector_metrics: usize,
    pub country_adjustments: usize,
    pub size_adjustments: usize,
    pub concentration_adjustments: usize,
}

impl ReferenceImportSummary {
    pub fn total(&self) -> usize {
        self.fx_rates
            + self.sector_metrics
            + self.country_adjustments
            + self.size_adjustments
            + self.concentration_adjustments
    }
}
