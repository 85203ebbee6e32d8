//! Database model for valuation results.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use valuator_core::valuations::{CalculatedMetrics, ValuationInput, ValuationResult};

/// One row per computed valuation: the input echo followed by the
/// calculated fields.
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::valuation_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ValuationResultDB {
    pub id: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    pub employees: Option<i64>,
    pub revenue_y1: Option<f64>,
    pub revenue_y2: Option<f64>,
    pub revenue_y3: Option<f64>,
    pub ebit_y1: Option<f64>,
    pub ebit_y2: Option<f64>,
    pub ebit_y3: Option<f64>,
    pub revenue_f1: Option<f64>,
    pub revenue_f2: Option<f64>,
    pub revenue_f3: Option<f64>,
    pub ebit_f1: Option<f64>,
    pub ebit_f2: Option<f64>,
    pub ebit_f3: Option<f64>,
    pub top3_concentration_pct: Option<f64>,
    pub founder_dependency_high: Option<bool>,
    pub supplier_dependency_high: Option<bool>,
    pub key_staff_retention_plan: Option<bool>,
    pub documentation_readiness: Option<String>,
    pub seller_flexibility: Option<String>,
    pub target_timeline_months: Option<i64>,
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
    pub created_at: NaiveDateTime,
}

impl From<ValuationResult> for ValuationResultDB {
    fn from(domain: ValuationResult) -> Self {
        let ValuationResult {
            id,
            input,
            metrics,
            created_at,
        } = domain;
        Self {
            id,
            company_name: input.company_name,
            sector: input.sector,
            country_code: input.country_code,
            currency_code: input.currency_code,
            employees: input.employees,
            revenue_y1: input.revenue_y1,
            revenue_y2: input.revenue_y2,
            revenue_y3: input.revenue_y3,
            ebit_y1: input.ebit_y1,
            ebit_y2: input.ebit_y2,
            ebit_y3: input.ebit_y3,
            revenue_f1: input.revenue_f1,
            revenue_f2: input.revenue_f2,
            revenue_f3: input.revenue_f3,
            ebit_f1: input.ebit_f1,
            ebit_f2: input.ebit_f2,
            ebit_f3: input.ebit_f3,
            top3_concentration_pct: input.top3_concentration_pct,
            founder_dependency_high: input.founder_dependency_high,
            supplier_dependency_high: input.supplier_dependency_high,
            key_staff_retention_plan: input.key_staff_retention_plan,
            documentation_readiness: input.documentation_readiness,
            seller_flexibility: input.seller_flexibility,
            target_timeline_months: input.target_timeline_months,
            calc_fx_rate: metrics.calc_fx_rate,
            calc_rev_avg_eur: metrics.calc_rev_avg_eur,
            calc_ebit_avg_eur: metrics.calc_ebit_avg_eur,
            calc_ebit_margin_pct: metrics.calc_ebit_margin_pct,
            calc_ebit_cagr_pct: metrics.calc_ebit_cagr_pct,
            calc_volatility_pct: metrics.calc_volatility_pct,
            calc_rev_cagr_pct: metrics.calc_rev_cagr_pct,
            factor_base_multiple: metrics.factor_base_multiple,
            factor_country_risk: metrics.factor_country_risk,
            factor_size_adj: metrics.factor_size_adj,
            factor_conc_adj: metrics.factor_conc_adj,
            factor_adj_multiple: metrics.factor_adj_multiple,
            val_ev_low_eur: metrics.val_ev_low_eur,
            val_ev_mid_eur: metrics.val_ev_mid_eur,
            val_ev_high_eur: metrics.val_ev_high_eur,
            created_at,
        }
    }
}

impl From<ValuationResultDB> for ValuationResult {
    fn from(db: ValuationResultDB) -> Self {
        Self {
            id: db.id,
            input: ValuationInput {
                company_name: db.company_name,
                sector: db.sector,
                country_code: db.country_code,
                currency_code: db.currency_code,
                employees: db.employees,
                revenue_y1: db.revenue_y1,
                revenue_y2: db.revenue_y2,
                revenue_y3: db.revenue_y3,
                ebit_y1: db.ebit_y1,
                ebit_y2: db.ebit_y2,
                ebit_y3: db.ebit_y3,
                revenue_f1: db.revenue_f1,
                revenue_f2: db.revenue_f2,
                revenue_f3: db.revenue_f3,
                ebit_f1: db.ebit_f1,
                ebit_f2: db.ebit_f2,
                ebit_f3: db.ebit_f3,
                top3_concentration_pct: db.top3_concentration_pct,
                founder_dependency_high: db.founder_dependency_high,
                supplier_dependency_high: db.supplier_dependency_high,
                key_staff_retention_plan: db.key_staff_retention_plan,
                documentation_readiness: db.documentation_readiness,
                seller_flexibility: db.seller_flexibility,
                target_timeline_months: db.target_timeline_months,
            },
            metrics: CalculatedMetrics {
                calc_fx_rate: db.calc_fx_rate,
                calc_rev_avg_eur: db.calc_rev_avg_eur,
                calc_ebit_avg_eur: db.calc_ebit_avg_eur,
                calc_ebit_margin_pct: db.calc_ebit_margin_pct,
                calc_ebit_cagr_pct: db.calc_ebit_cagr_pct,
                calc_volatility_pct: db.calc_volatility_pct,
                calc_rev_cagr_pct: db.calc_rev_cagr_pct,
                factor_base_multiple: db.factor_base_multiple,
                factor_country_risk: db.factor_country_risk,
                factor_size_adj: db.factor_size_adj,
                factor_conc_adj: db.factor_conc_adj,
                factor_adj_multiple: db.factor_adj_multiple,
                val_ev_low_eur: db.val_ev_low_eur,
                val_ev_mid_eur: db.val_ev_mid_eur,
                val_ev_high_eur: db.val_ev_high_eur,
            },
            created_at: db.created_at,
        }
    }
}
