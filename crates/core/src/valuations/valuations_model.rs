//! Valuation domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::number_utils::parse_lenient_number;

/// Request record for a valuation. Every numeric field is optional; absence
/// means "unknown", not zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValuationInput {
    // Identification
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub employees: Option<i64>,

    // Historical financials (Y1 = earliest trailing year, Y3 = latest)
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_y1: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_y2: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_y3: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_y1: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_y2: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_y3: Option<f64>,

    // Forecast financials
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_f1: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_f2: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue_f3: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_f1: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_f2: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ebit_f3: Option<f64>,

    // Risk & operations
    #[serde(deserialize_with = "lenient_number")]
    pub top3_concentration_pct: Option<f64>,
    pub founder_dependency_high: Option<bool>,
    pub supplier_dependency_high: Option<bool>,
    pub key_staff_retention_plan: Option<bool>,
    pub documentation_readiness: Option<String>,
    pub seller_flexibility: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub target_timeline_months: Option<i64>,
}

impl ValuationInput {
    /// Company name with surrounding whitespace removed, if one was given.
    pub fn company_name(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Fixed input used by the diagnostic calculation endpoint and the
    /// golden-output tests.
    pub fn reference_fixture() -> Self {
        Self {
            company_name: Some("Test Valuation Data".to_string()),
            sector: Some("Consumer Electronics Brands".to_string()),
            country_code: Some("US".to_string()),
            currency_code: Some("USD".to_string()),
            employees: Some(161_000),
            revenue_y1: Some(394_328_000_000.0),
            revenue_y2: Some(365_817_000_000.0),
            revenue_y3: Some(274_515_000_000.0),
            ebit_y1: Some(114_301_000_000.0),
            ebit_y2: Some(108_949_000_000.0),
            ebit_y3: Some(66_288_000_000.0),
            revenue_f1: Some(420_000_000_000.0),
            revenue_f2: Some(450_000_000_000.0),
            revenue_f3: Some(480_000_000_000.0),
            ebit_f1: Some(120_000_000_000.0),
            ebit_f2: Some(130_000_000_000.0),
            ebit_f3: Some(145_000_000_000.0),
            top3_concentration_pct: Some(25.0),
            founder_dependency_high: Some(false),
            supplier_dependency_high: Some(false),
            key_staff_retention_plan: Some(true),
            documentation_readiness: Some("Full".to_string()),
            seller_flexibility: Some("High".to_string()),
            target_timeline_months: Some(3),
        }
    }

    pub fn revenue_history(&self) -> [Option<f64>; 3] {
        [self.revenue_y1, self.revenue_y2, self.revenue_y3]
    }

    pub fn ebit_history(&self) -> [Option<f64>; 3] {
        [self.ebit_y1, self.ebit_y2, self.ebit_y3]
    }
}

/// Accepts a JSON number, a numeric string or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<LenientNumber>::deserialize(deserializer)? {
            Some(LenientNumber::Number(v)) if v.is_finite() => Some(v),
            Some(LenientNumber::Text(s)) => parse_lenient_number(&s),
            _ => None,
        },
    )
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|v| v.trunc() as i64))
}

/// Three-year averages converted to EUR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalAverages {
    pub rev_avg_eur: i64,
    pub ebit_avg_eur: i64,
}

/// Margin, growth and volatility statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRatios {
    pub ebit_margin_pct: Option<f64>,
    pub ebit_cagr_pct: f64,
    pub rev_cagr_pct: f64,
    pub volatility_pct: f64,
}

/// Resolved multiple and the deltas applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipleFactors {
    pub base_multiple: Option<f64>,
    pub country_risk: f64,
    pub size_adj: f64,
    pub conc_adj: f64,
}

/// Enterprise value band in thousands of EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvBand {
    pub low_k: i64,
    pub mid_k: i64,
    pub high_k: i64,
}

/// What the EV band is derived from.
///
/// Only `WeightedEbit` exists: the band is the blended EBIT itself and the
/// adjusted multiple is not applied. A multiple-based mode would be added
/// here as a new variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvBasis {
    #[default]
    WeightedEbit,
}

/// Everything the engine derives from one input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatedMetrics {
    pub calc_fx_rate: f64,
    pub calc_rev_avg_eur: i64,
    pub calc_ebit_avg_eur: i64,
    pub calc_ebit_margin_pct: Option<f64>,
    pub calc_ebit_cagr_pct: f64,
    pub calc_volatility_pct: f64,
    pub calc_rev_cagr_pct: f64,
    pub factor_base_multiple: Option<f64>,
    pub factor_country_risk: f64,
    pub factor_size_adj: f64,
    pub factor_conc_adj: f64,
    pub factor_adj_multiple: Option<f64>,
    pub val_ev_low_eur: Option<String>,
    pub val_ev_mid_eur: Option<String>,
    pub val_ev_high_eur: Option<String>,
}

/// Persisted valuation: the input echo plus the calculated fields. Never
/// modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationResult {
    pub id: String,
    #[serde(flatten)]
    pub input: ValuationInput,
    #[serde(flatten)]
    pub metrics: CalculatedMetrics,
    pub created_at: NaiveDateTime,
}

/// Output of the diagnostic calculation: nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCalculation {
    pub input: ValuationInput,
    pub calculated_metrics: CalculatedMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_accept_strings_and_nulls() {
        let input: ValuationInput = serde_json::from_str(
            r#"{
                "company_name": "Acme",
                "revenue_y1": "394328000000",
                "revenue_y2": 365817000000,
                "revenue_y3": null,
                "ebit_y1": "",
                "ebit_y2": "n/a",
                "employees": "161000",
                "top3_concentration_pct": 25.5
            }"#,
        )
        .unwrap();

        assert_eq!(input.revenue_y1, Some(394_328_000_000.0));
        assert_eq!(input.revenue_y2, Some(365_817_000_000.0));
        assert_eq!(input.revenue_y3, None);
        assert_eq!(input.ebit_y1, None);
        assert_eq!(input.ebit_y2, None);
        assert_eq!(input.ebit_y3, None);
        assert_eq!(input.employees, Some(161_000));
        assert_eq!(input.top3_concentration_pct, Some(25.5));
    }

    #[test]
    fn test_company_name_is_trimmed() {
        let mut input = ValuationInput {
            company_name: Some("  Acme GmbH ".to_string()),
            ..Default::default()
        };
        assert_eq!(input.company_name(), Some("Acme GmbH"));
        input.company_name = Some("   ".to_string());
        assert_eq!(input.company_name(), None);
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = ValuationResult {
            id: "0190".to_string(),
            input: ValuationInput {
                company_name: Some("Acme".to_string()),
                ..Default::default()
            },
            metrics: CalculatedMetrics {
                calc_fx_rate: 1.0,
                calc_rev_avg_eur: 0,
                calc_ebit_avg_eur: 0,
                calc_ebit_margin_pct: None,
                calc_ebit_cagr_pct: 0.0,
                calc_volatility_pct: 0.0,
                calc_rev_cagr_pct: 0.0,
                factor_base_multiple: None,
                factor_country_risk: 0.0,
                factor_size_adj: 0.0,
                factor_conc_adj: 0.0,
                factor_adj_multiple: None,
                val_ev_low_eur: None,
                val_ev_mid_eur: None,
                val_ev_high_eur: None,
            },
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["company_name"], "Acme");
        assert_eq!(json["calc_fx_rate"], 1.0);
        assert!(json["factor_adj_multiple"].is_null());
        assert!(json.get("input").is_none());
    }
}
