//! Numeric helpers shared by the calculation stages.

/// Returns true when a value can take part in a guarded calculation.
///
/// Absent, zero and NaN values are all treated as unusable. A genuine zero
/// EBIT therefore suppresses a growth rate exactly like a missing one.
pub fn is_usable_number(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0 && !v.is_nan())
}

/// Missing or NaN values contribute zero.
pub fn value_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Rounds to the nearest integer with ties going toward positive infinity,
/// so `2.5 -> 3` and `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds to `dp` decimal places the way a fixed-point display does.
///
/// The exact binary value is rounded, so `1.045` (stored just below the tie)
/// becomes `1.04`. Values that sit exactly on a tie go away from zero.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let precision = dp as usize;
    if !value.is_finite() || precision >= EXACT_FRACTION_DIGITS {
        return value;
    }
    let magnitude = value.abs();
    // Step past an exact tie so the formatter cannot round it to even.
    let target = if is_exact_tie(magnitude, precision) {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let rounded = format!("{:.*}", precision, target)
        .parse::<f64>()
        .unwrap_or(magnitude);
    if rounded == 0.0 {
        0.0
    } else {
        rounded.copysign(value)
    }
}

/// Every finite `f64` has a terminating expansion of at most this many
/// fractional digits.
const EXACT_FRACTION_DIGITS: usize = 1074;

fn is_exact_tie(magnitude: f64, precision: usize) -> bool {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, magnitude);
    let fraction = &exact[exact.len() - EXACT_FRACTION_DIGITS..];
    let tail = &fraction[precision..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

/// Parses a numeric string the way loosely typed request payloads send them.
///
/// Surrounding whitespace is ignored. Empty, unparseable and non-finite
/// values are reported as absent.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_nan_are_not_usable() {
        assert!(!is_usable_number(None));
        assert!(!is_usable_number(Some(0.0)));
        assert!(!is_usable_number(Some(-0.0)));
        assert!(!is_usable_number(Some(f64::NAN)));
        assert!(is_usable_number(Some(-12.5)));
        assert!(is_usable_number(Some(1e-9)));
    }

    #[test]
    fn test_round_half_up_on_ties() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(114_960_666_666.666_67), 114_960_666_667.0);
    }

    #[test]
    fn test_round_dp_goes_away_from_zero() {
        assert_eq!(round_dp(27.984_5, 2), 27.98);
        assert_eq!(round_dp(-23.845_9, 2), -23.85);
        assert_eq!(round_dp(0.125, 2), 0.13);
        assert_eq!(round_dp(-0.125, 2), -0.13);
        assert_eq!(round_dp(2.5, 0), 3.0);
        assert_eq!(round_dp(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_dp_uses_the_stored_binary_value() {
        // Stored just below the written tie, although scaling by 100 lands on it.
        assert_eq!(round_dp(1.045, 2), 1.04);
        assert_eq!(round_dp(0.615, 2), 0.61);
        assert_eq!(round_dp(2.675, 2), 2.67);
        assert_eq!(round_dp(1.005, 2), 1.0);
        assert_eq!(round_dp(-1.045, 2), -1.04);
        // Stored just above.
        assert_eq!(round_dp(199.985, 2), 199.99);
        assert_eq!(round_dp(8.345, 2), 8.35);
    }

    #[test]
    fn test_round_dp_edge_values() {
        assert_eq!(round_dp(-0.001, 2), 0.0);
        assert!(round_dp(-0.001, 2).is_sign_positive());
        assert_eq!(round_dp(123_456_789.0, 2), 123_456_789.0);
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_parse_lenient_number() {
        assert_eq!(parse_lenient_number(" 394328000000 "), Some(394_328_000_000.0));
        assert_eq!(parse_lenient_number("-1.5"), Some(-1.5));
        assert_eq!(parse_lenient_number(""), None);
        assert_eq!(parse_lenient_number("1,000"), None);
        assert_eq!(parse_lenient_number("NaN"), None);
        assert_eq!(parse_lenient_number("inf"), None);
    }
}
