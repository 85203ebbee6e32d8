//! CSV readers for the reference sheet.
//!
//! Each table is exported as its own CSV file with the sheet's column
//! headers. Reading stops at the first row whose key column is blank,
//! placeholder rows (`...`/`…`) are skipped and thousands separators are
//! stripped from numeric cells.

use std::collections::HashMap;
use std::io::Read;

use log::warn;

use super::reference_errors::ReferenceImportError;
use super::reference_model::{
    ConcentrationAdjustment, CountryAdjustment, FxRate, SectorMetric, SizeAdjustment,
};
use crate::errors::Result;

/// The CSV files making up a reference sheet export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFile {
    FxRates,
    SectorMetrics,
    CountryAdjustments,
    SizeAdjustments,
    ConcentrationAdjustments,
}

impl ReferenceFile {
    pub const ALL: [ReferenceFile; 5] = [
        ReferenceFile::FxRates,
        ReferenceFile::SectorMetrics,
        ReferenceFile::CountryAdjustments,
        ReferenceFile::SizeAdjustments,
        ReferenceFile::ConcentrationAdjustments,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReferenceFile::FxRates => "fx_rates.csv",
            ReferenceFile::SectorMetrics => "sector_metrics.csv",
            ReferenceFile::CountryAdjustments => "country_adjustments.csv",
            ReferenceFile::SizeAdjustments => "size_adjustments.csv",
            ReferenceFile::ConcentrationAdjustments => "concentration_adjustments.csv",
        }
    }
}

const PLACEHOLDERS: [&str; 2] = ["...", "…"];

type SheetRow = HashMap<&'static str, String>;

fn read_table<R: Read>(
    reader: R,
    source: &str,
    key_column: &'static str,
    columns: &[&'static str],
) -> std::result::Result<Vec<SheetRow>, ReferenceImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ReferenceImportError::Csv {
            path: source.to_string(),
            message: e.to_string(),
        })?
        .clone();

    let indices: Vec<(&'static str, usize)> = columns
        .iter()
        .filter_map(|col| headers.iter().position(|h| h == *col).map(|idx| (*col, idx)))
        .collect();

    if !indices.iter().any(|(col, _)| *col == key_column) {
        return Err(ReferenceImportError::MissingColumn {
            path: source.to_string(),
            column: key_column.to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| ReferenceImportError::Csv {
            path: source.to_string(),
            message: e.to_string(),
        })?;

        let mut row = SheetRow::with_capacity(indices.len());
        for (col, idx) in &indices {
            row.insert(*col, record.get(*idx).unwrap_or_default().to_string());
        }

        if row.get(key_column).map_or(true, |v| v.is_empty()) {
            break;
        }
        if row
            .values()
            .any(|v| PLACEHOLDERS.iter().any(|p| v.contains(p)))
        {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

fn text(row: &SheetRow, column: &str) -> Option<String> {
    row.get(column).filter(|v| !v.is_empty()).cloned()
}

fn number(
    row: &SheetRow,
    source: &str,
    column: &str,
) -> std::result::Result<Option<f64>, ReferenceImportError> {
    let Some(raw) = row.get(column).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.replace(',', "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ReferenceImportError::InvalidValue {
            path: source.to_string(),
            column: column.to_string(),
            value: raw.clone(),
        })
}

fn required_number(
    row: &SheetRow,
    source: &str,
    column: &str,
) -> std::result::Result<Option<f64>, ReferenceImportError> {
    let value = number(row, source, column)?;
    if value.is_none() {
        warn!("Skipping row in {} without a value for {}", source, column);
    }
    Ok(value)
}

pub fn read_fx_rates<R: Read>(reader: R, source: &str) -> Result<Vec<FxRate>> {
    let rows = read_table(reader, source, "Currency", &["Currency", "RateToEUR"])?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(rate_to_eur) = required_number(&row, source, "RateToEUR")? else {
            continue;
        };
        out.push(FxRate {
            currency_code: row["Currency"].clone(),
            rate_to_eur,
        });
    }
    Ok(out)
}

pub fn read_sector_metrics<R: Read>(reader: R, source: &str) -> Result<Vec<SectorMetric>> {
    let rows = read_table(
        reader,
        source,
        "subsector_id",
        &[
            "sector_id",
            "subsector_id",
            "sector_en",
            "sector_de",
            "subsector_en",
            "subsector_de",
            "Subsector_Name (Updated)",
            "Base_EBIT_Multiple",
            "Target_EBIT_Margin_%",
            "Target_CAGR_%",
            "BandMin",
        ],
    )?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(SectorMetric {
            subsector_id: row["subsector_id"].clone(),
            sector_id: text(&row, "sector_id"),
            sector_en: text(&row, "sector_en"),
            sector_de: text(&row, "sector_de"),
            subsector_en: text(&row, "subsector_en"),
            subsector_de: text(&row, "subsector_de"),
            subsector_name_updated: text(&row, "Subsector_Name (Updated)"),
            base_ebit_multiple: number(&row, source, "Base_EBIT_Multiple")?,
            target_ebit_margin_pct: number(&row, source, "Target_EBIT_Margin_%")?,
            target_cagr_pct: number(&row, source, "Target_CAGR_%")?,
            band_min: number(&row, source, "BandMin")?,
        });
    }
    Ok(out)
}

pub fn read_country_adjustments<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<CountryAdjustment>> {
    let rows = read_table(
        reader,
        source,
        "CountryCode",
        &["CountryCode", "DeltaMultiple"],
    )?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(delta_multiple) = required_number(&row, source, "DeltaMultiple")? else {
            continue;
        };
        out.push(CountryAdjustment {
            country_code: row["CountryCode"].clone(),
            delta_multiple,
        });
    }
    Ok(out)
}

pub fn read_size_adjustments<R: Read>(reader: R, source: &str) -> Result<Vec<SizeAdjustment>> {
    let rows = read_table(
        reader,
        source,
        "RevMin_EUR",
        &["RevMin_EUR", "DeltaMultiple"],
    )?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(rev_min_eur), Some(delta_multiple)) = (
            required_number(&row, source, "RevMin_EUR")?,
            required_number(&row, source, "DeltaMultiple")?,
        ) else {
            continue;
        };
        out.push(SizeAdjustment {
            rev_min_eur,
            delta_multiple,
        });
    }
    Ok(out)
}

pub fn read_concentration_adjustments<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<ConcentrationAdjustment>> {
    let rows = read_table(
        reader,
        source,
        "Top3_MinPct",
        &["Top3_MinPct", "DeltaMultiple"],
    )?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(top3_min_pct), Some(delta_multiple)) = (
            required_number(&row, source, "Top3_MinPct")?,
            required_number(&row, source, "DeltaMultiple")?,
        ) else {
            continue;
        };
        out.push(ConcentrationAdjustment {
            top3_min_pct,
            delta_multiple,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_reads_fx_rates_and_stops_at_blank_key() {
        let csv = "Currency,RateToEUR\nUSD,0.93\n GBP , 1.17 \n,\nCHF,1.05\n";
        let rates = read_fx_rates(csv.as_bytes(), "fx_rates.csv").unwrap();
        assert_eq!(
            rates,
            vec![
                FxRate {
                    currency_code: "USD".to_string(),
                    rate_to_eur: 0.93
                },
                FxRate {
                    currency_code: "GBP".to_string(),
                    rate_to_eur: 1.17
                },
            ]
        );
    }

    #[test]
    fn test_size_brackets_strip_thousands_separators() {
        let csv = "RevMin_EUR,DeltaMultiple\n\"1,000,000\",-1.5\n\"10,000,000\",0.6\n";
        let rows = read_size_adjustments(csv.as_bytes(), "size_adjustments.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rev_min_eur, 1_000_000.0);
        assert_eq!(rows[1].delta_multiple, 0.6);
    }

    #[test]
    fn test_placeholder_rows_are_skipped() {
        let csv = "Top3_MinPct,DeltaMultiple\n20,0\n…,…\n40,-0.5\n...,-1\n";
        let rows =
            read_concentration_adjustments(csv.as_bytes(), "concentration_adjustments.csv")
                .unwrap();
        let thresholds: Vec<f64> = rows.iter().map(|r| r.top3_min_pct).collect();
        assert_eq!(thresholds, vec![20.0, 40.0]);
    }

    #[test]
    fn test_rows_without_delta_are_skipped() {
        let csv = "CountryCode,DeltaMultiple\nUS,0.2\nDE,\nFR,-0.1\n";
        let rows = read_country_adjustments(csv.as_bytes(), "country_adjustments.csv").unwrap();
        let codes: Vec<&str> = rows.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(codes, vec!["US", "FR"]);
    }

    #[test]
    fn test_missing_key_column_is_an_error() {
        let csv = "Code,Rate\nUSD,0.93\n";
        let err = read_fx_rates(csv.as_bytes(), "fx_rates.csv").unwrap_err();
        assert!(matches!(
            err,
            Error::ReferenceImport(ReferenceImportError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_non_numeric_value_is_an_error() {
        let csv = "Currency,RateToEUR\nUSD,abc\n";
        let err = read_fx_rates(csv.as_bytes(), "fx_rates.csv").unwrap_err();
        assert!(matches!(
            err,
            Error::ReferenceImport(ReferenceImportError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_sector_metrics_keep_optional_columns() {
        let csv = "sector_id,subsector_id,sector_en,sector_de,subsector_en,subsector_de,Subsector_Name (Updated),Base_EBIT_Multiple,Target_EBIT_Margin_%,Target_CAGR_%,BandMin\n\
                   S10,S10-03,Technology,Technologie,Consumer Electronics,Unterhaltungselektronik,Consumer Electronics Brands,11,12.5,4,8\n\
                   S20,S20-01,Retail,Handel,Grocery,Lebensmittel,Grocery Retail,,,,\n";
        let rows = read_sector_metrics(csv.as_bytes(), "sector_metrics.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].subsector_name_updated.as_deref(),
            Some("Consumer Electronics Brands")
        );
        assert_eq!(rows[0].base_ebit_multiple, Some(11.0));
        assert_eq!(rows[0].band_min, Some(8.0));
        assert_eq!(rows[1].base_ebit_multiple, None);
        assert_eq!(rows[1].sector_de.as_deref(), Some("Handel"));
    }
}
