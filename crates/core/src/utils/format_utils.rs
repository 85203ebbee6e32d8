use crate::constants::EV_DISPLAY_SUFFIX;

/// Formats an integer with comma thousands separators (`1234567 -> "1,234,567"`).
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders an EV figure already expressed in thousands, e.g. `"87,773k EUR"`.
pub fn format_k_eur(value_k: i64) -> String {
    format!("{}{}", format_grouped(value_k), EV_DISPLAY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(87_772_800), "87,772,800");
        assert_eq!(format_grouped(-1_234_567), "-1,234,567");
        assert_eq!(format_grouped(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_k_eur() {
        assert_eq!(format_k_eur(87_773), "87,773k EUR");
        assert_eq!(format_k_eur(12), "12k EUR");
    }
}
