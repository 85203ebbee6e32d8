//! Database models for reference data.

use diesel::prelude::*;
use valuator_core::reference::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, SectorMetric, SizeAdjustment,
};

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reference_fx_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FxRateDB {
    pub currency_code: String,
    pub rate_to_eur: f64,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reference_sector_metrics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SectorMetricDB {
    pub subsector_id: String,
    pub sector_id: Option<String>,
    pub sector_en: Option<String>,
    pub sector_de: Option<String>,
    pub subsector_en: Option<String>,
    pub subsector_de: Option<String>,
    pub subsector_name_updated: Option<String>,
    pub base_ebit_multiple: Option<f64>,
    pub target_ebit_margin_pct: Option<f64>,
    pub target_cagr_pct: Option<f64>,
    pub band_min: Option<f64>,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reference_country_adjustments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CountryAdjustmentDB {
    pub country_code: String,
    pub delta_multiple: f64,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reference_size_adjustments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SizeAdjustmentDB {
    pub rev_min_eur: f64,
    pub delta_multiple: f64,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reference_concentration_adjustments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConcentrationAdjustmentDB {
    pub top3_min_pct: f64,
    pub delta_multiple: f64,
}

// Conversion to domain models
impl From<FxRateDB> for FxRate {
    fn from(db: FxRateDB) -> Self {
        Self {
            currency_code: db.currency_code,
            rate_to_eur: db.rate_to_eur,
        }
    }
}

impl From<FxRate> for FxRateDB {
    fn from(domain: FxRate) -> Self {
        Self {
            currency_code: domain.currency_code,
            rate_to_eur: domain.rate_to_eur,
        }
    }
}

impl From<SectorMetricDB> for SectorMetric {
    fn from(db: SectorMetricDB) -> Self {
        Self {
            subsector_id: db.subsector_id,
            sector_id: db.sector_id,
            sector_en: db.sector_en,
            sector_de: db.sector_de,
            subsector_en: db.subsector_en,
            subsector_de: db.subsector_de,
            subsector_name_updated: db.subsector_name_updated,
            base_ebit_multiple: db.base_ebit_multiple,
            target_ebit_margin_pct: db.target_ebit_margin_pct,
            target_cagr_pct: db.target_cagr_pct,
            band_min: db.band_min,
        }
    }
}

impl From<SectorMetric> for SectorMetricDB {
    fn from(domain: SectorMetric) -> Self {
        Self {
            subsector_id: domain.subsector_id,
            sector_id: domain.sector_id,
            sector_en: domain.sector_en,
            sector_de: domain.sector_de,
            subsector_en: domain.subsector_en,
            subsector_de: domain.subsector_de,
            subsector_name_updated: domain.subsector_name_updated,
            base_ebit_multiple: domain.base_ebit_multiple,
            target_ebit_margin_pct: domain.target_ebit_margin_pct,
            target_cagr_pct: domain.target_cagr_pct,
            band_min: domain.band_min,
        }
    }
}

impl From<CountryAdjustmentDB> for CountryAdjustment {
    fn from(db: CountryAdjustmentDB) -> Self {
        Self {
            country_code: db.country_code,
            delta_multiple: db.delta_multiple,
        }
    }
}

impl From<CountryAdjustment> for CountryAdjustmentDB {
    fn from(domain: CountryAdjustment) -> Self {
        Self {
            country_code: domain.country_code,
            delta_multiple: domain.delta_multiple,
        }
    }
}

impl From<SizeAdjustmentDB> for SizeAdjustment {
    fn from(db: SizeAdjustmentDB) -> Self {
        Self {
            rev_min_eur: db.rev_min_eur,
            delta_multiple: db.delta_multiple,
        }
    }
}

impl From<SizeAdjustment> for SizeAdjustmentDB {
    fn from(domain: SizeAdjustment) -> Self {
        Self {
            rev_min_eur: domain.rev_min_eur,
            delta_multiple: domain.delta_multiple,
        }
    }
}

impl From<ConcentrationAdjustmentDB> for ConcentrationAdjustment {
    fn from(db: ConcentrationAdjustmentDB) -> Self {
        Self {
            top3_min_pct: db.top3_min_pct,
            delta_multiple: db.delta_multiple,
        }
    }
}

impl From<ConcentrationAdjustment> for ConcentrationAdjustmentDB {
    fn from(domain: ConcentrationAdjustment) -> Self {
        Self {
            top3_min_pct: domain.top3_min_pct,
            delta_multiple: domain.delta_multiple,
        }
    }
}
