//! Pure calculation stages of the valuation pipeline.
//!
//! Nothing here touches storage. Lookups are resolved by the service and
//! passed in, which keeps every numeric rule testable on its own.

use super::valuations_model::{
    EvBand, EvBasis, GrowthRatios, HistoricalAverages, MultipleFactors, ValuationInput,
};
use crate::constants::{
    CAGR_EXPONENT, DISPLAY_DECIMAL_PRECISION, EV_HIGH_FACTOR, EV_MID_FACTOR, EV_UNIT_DIVISOR,
    FORWARD_EBIT_WEIGHT, HISTORY_YEARS, MULTIPLE_CAP_SPREAD, MULTIPLE_FLOOR,
    TRAILING_EBIT_WEIGHT,
};
use crate::utils::format_utils::format_k_eur;
use crate::utils::number_utils::{is_usable_number, round_dp, round_half_up, value_or_zero};

/// Mean of three yearly values converted to EUR and rounded to a whole euro.
/// The denominator is always three; missing years count as zero.
pub fn average_in_eur(values: [Option<f64>; 3], fx_rate: f64) -> i64 {
    let sum: f64 = values.iter().map(|v| value_or_zero(*v)).sum();
    round_half_up(sum / HISTORY_YEARS * fx_rate) as i64
}

pub fn historical_averages(input: &ValuationInput, fx_rate: f64) -> HistoricalAverages {
    HistoricalAverages {
        rev_avg_eur: average_in_eur(input.revenue_history(), fx_rate),
        ebit_avg_eur: average_in_eur(input.ebit_history(), fx_rate),
    }
}

/// EBIT margin in percent. `None` unless both averages are non-zero.
pub fn ebit_margin_pct(averages: &HistoricalAverages) -> Option<f64> {
    if averages.rev_avg_eur == 0 || averages.ebit_avg_eur == 0 {
        return None;
    }
    let margin = averages.ebit_avg_eur as f64 / averages.rev_avg_eur as f64 * 100.0;
    Some(round_dp(margin, DISPLAY_DECIMAL_PRECISION))
}

/// Growth rate in percent between Y1 and Y3.
///
/// Zero when either endpoint is unusable (absent, zero, NaN) or the values
/// change sign, which would make the root undefined.
pub fn two_year_cagr_pct(start: Option<f64>, end: Option<f64>) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };
    if !is_usable_number(Some(start)) || !is_usable_number(Some(end)) {
        return 0.0;
    }
    let ratio = end / start;
    if ratio < 0.0 {
        return 0.0;
    }
    round_dp(
        (ratio.powf(CAGR_EXPONENT) - 1.0) * 100.0,
        DISPLAY_DECIMAL_PRECISION,
    )
}

/// Coefficient of variation of the three EBIT points, in percent.
///
/// Uses the n-1 divisor. Missing points count as zero; a zero mean gives 0.
pub fn volatility_pct(points: [Option<f64>; 3]) -> f64 {
    let values = points.map(value_or_zero);
    let mean = values.iter().sum::<f64>() / HISTORY_YEARS;
    if mean == 0.0 {
        return 0.0;
    }
    let sum_sq_diff: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let stdev = (sum_sq_diff / (HISTORY_YEARS - 1.0)).sqrt();
    round_dp(stdev / mean * 100.0, DISPLAY_DECIMAL_PRECISION)
}

pub fn growth_ratios(input: &ValuationInput, averages: &HistoricalAverages) -> GrowthRatios {
    GrowthRatios {
        ebit_margin_pct: ebit_margin_pct(averages),
        ebit_cagr_pct: two_year_cagr_pct(input.ebit_y1, input.ebit_y3),
        rev_cagr_pct: two_year_cagr_pct(input.revenue_y1, input.revenue_y3),
        volatility_pct: volatility_pct(input.ebit_history()),
    }
}

/// Applies the deltas to the base multiple, capped at `base + 2` and floored
/// at 0.5. Without a base multiple there is nothing to adjust.
pub fn adjusted_multiple(factors: &MultipleFactors) -> Option<f64> {
    let base = factors.base_multiple?;
    let summed = base + factors.size_adj + factors.country_risk + factors.conc_adj;
    let cap = base + MULTIPLE_CAP_SPREAD;
    let adjusted = summed.min(cap).max(MULTIPLE_FLOOR);
    Some(round_dp(adjusted, DISPLAY_DECIMAL_PRECISION))
}

/// Projects the EV band from the last trailing and first forecast EBIT.
///
/// Both must be usable numbers. `_fx_rate` is accepted but not applied: the
/// band is built from the EBIT figures as entered.
pub fn project_ev(
    ebit_y3: Option<f64>,
    ebit_f1: Option<f64>,
    _fx_rate: f64,
    basis: EvBasis,
) -> Option<EvBand> {
    if !is_usable_number(ebit_y3) || !is_usable_number(ebit_f1) {
        return None;
    }
    let (ebit_y3, ebit_f1) = (ebit_y3?, ebit_f1?);

    let value_eur = match basis {
        EvBasis::WeightedEbit => TRAILING_EBIT_WEIGHT * ebit_y3 + FORWARD_EBIT_WEIGHT * ebit_f1,
    };
    let value_k = value_eur / EV_UNIT_DIVISOR;

    Some(EvBand {
        low_k: to_whole(value_k),
        mid_k: to_whole(value_k * EV_MID_FACTOR),
        high_k: to_whole(value_k * EV_HIGH_FACTOR),
    })
}

fn to_whole(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Presentation strings for a band, in `low, mid, high` order.
pub fn format_ev_band(band: &EvBand) -> [String; 3] {
    [
        format_k_eur(band.low_k),
        format_k_eur(band.mid_k),
        format_k_eur(band.high_k),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 0.01
    }

    #[test]
    fn test_average_counts_missing_years_as_zero() {
        assert_eq!(average_in_eur([Some(5.0), None, None], 1.0), 2);
        assert_eq!(average_in_eur([Some(300.0), None, None], 1.0), 100);
        assert_eq!(average_in_eur([None, None, None], 0.93), 0);
    }

    #[test]
    fn test_average_applies_fx_before_rounding() {
        // (100 + 200 + 300) / 3 * 0.93 = 186
        assert_eq!(average_in_eur([Some(100.0), Some(200.0), Some(300.0)], 0.93), 186);
        // 1.5 rounds up, -1.5 rounds toward zero
        assert_eq!(average_in_eur([Some(4.5), None, None], 1.0), 2);
        assert_eq!(average_in_eur([Some(-4.5), None, None], 1.0), -1);
    }

    #[test]
    fn test_margin_requires_non_zero_averages() {
        let zero_rev = HistoricalAverages {
            rev_avg_eur: 0,
            ebit_avg_eur: 10,
        };
        let zero_ebit = HistoricalAverages {
            rev_avg_eur: 10,
            ebit_avg_eur: 0,
        };
        assert_eq!(ebit_margin_pct(&zero_rev), None);
        assert_eq!(ebit_margin_pct(&zero_ebit), None);

        let averages = HistoricalAverages {
            rev_avg_eur: 3,
            ebit_avg_eur: 1,
        };
        assert_eq!(ebit_margin_pct(&averages), Some(33.33));
    }

    #[test]
    fn test_cagr_guards() {
        assert_eq!(two_year_cagr_pct(None, Some(10.0)), 0.0);
        assert_eq!(two_year_cagr_pct(Some(0.0), Some(10.0)), 0.0);
        assert_eq!(two_year_cagr_pct(Some(10.0), Some(0.0)), 0.0);
        assert_eq!(two_year_cagr_pct(Some(-10.0), Some(10.0)), 0.0);
        assert_eq!(two_year_cagr_pct(Some(100.0), Some(121.0)), 10.0);
        // both negative: ratio is positive, growth computed
        assert_eq!(two_year_cagr_pct(Some(-100.0), Some(-121.0)), 10.0);
    }

    #[test]
    fn test_volatility() {
        assert_eq!(volatility_pct([Some(10.0), Some(10.0), Some(10.0)]), 0.0);
        assert_eq!(volatility_pct([Some(-5.0), Some(5.0), None]), 0.0);
        assert_eq!(volatility_pct([None, None, None]), 0.0);
        // mean 20, deviations -10, 0, 10 -> stdev 10 -> 50%
        assert_eq!(volatility_pct([Some(10.0), Some(20.0), Some(30.0)]), 50.0);
    }

    #[test]
    fn test_adjusted_multiple_cap_and_floor() {
        let mut factors = MultipleFactors {
            base_multiple: Some(11.0),
            country_risk: 0.2,
            size_adj: 0.6,
            conc_adj: 0.0,
        };
        assert_eq!(adjusted_multiple(&factors), Some(11.8));

        factors.size_adj = 3.0;
        assert_eq!(adjusted_multiple(&factors), Some(13.0));

        factors.base_multiple = Some(1.0);
        factors.size_adj = -4.0;
        assert_eq!(adjusted_multiple(&factors), Some(0.5));

        factors.base_multiple = None;
        assert_eq!(adjusted_multiple(&factors), None);
    }

    #[test]
    fn test_project_ev_band() {
        let band = project_ev(
            Some(66_288_000_000.0),
            Some(120_000_000_000.0),
            0.93,
            EvBasis::WeightedEbit,
        )
        .unwrap();
        assert_eq!(band.low_k, 87_772_800);
        assert_eq!(band.mid_k, 74_606_880);
        assert_eq!(band.high_k, 100_938_720);
        assert_eq!(
            format_ev_band(&band),
            [
                "87,772,800k EUR".to_string(),
                "74,606,880k EUR".to_string(),
                "100,938,720k EUR".to_string()
            ]
        );
    }

    #[test]
    fn test_project_ev_small_negative_band_is_zero() {
        let band = project_ev(Some(-100.0), Some(-100.0), 1.0, EvBasis::WeightedEbit).unwrap();
        assert_eq!((band.low_k, band.mid_k, band.high_k), (0, 0, 0));
        assert_eq!(format_ev_band(&band)[0], "0k EUR");

        let band = project_ev(Some(-2_000.0), Some(-2_000.0), 1.0, EvBasis::WeightedEbit).unwrap();
        assert_eq!(band.low_k, -2);
    }

    #[test]
    fn test_project_ev_requires_both_years() {
        assert_eq!(project_ev(None, Some(1.0), 1.0, EvBasis::WeightedEbit), None);
        assert_eq!(project_ev(Some(1.0), Some(0.0), 1.0, EvBasis::WeightedEbit), None);
        assert_eq!(
            project_ev(Some(f64::NAN), Some(1.0), 1.0, EvBasis::WeightedEbit),
            None
        );
    }

    #[test]
    fn test_fixture_ratios() {
        let input = ValuationInput::reference_fixture();
        let averages = historical_averages(&input, 0.93);
        let ratios = growth_ratios(&input, &averages);

        assert!(approx(ratios.ebit_cagr_pct, -23.85));
        assert!(approx(ratios.rev_cagr_pct, -16.56));
        assert!(approx(ratios.volatility_pct, 27.26));
        assert!(approx(ratios.ebit_margin_pct.unwrap(), 27.98));
    }
}
