//! Number formatting for labels.

/// Format `value` with a fixed number of decimal places.
///
/// Exact ties round half away from zero, so 9.125 prints as "9.13" rather
/// than the "9.12" that `{:.2}` gives. Values that only look like ties in
/// decimal (1.005 is stored as 1.00499...) round by their stored value.
pub fn format_value_with_decimals(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scale = 10f64.powi(decimals as i32);
    let twice = 2.0 * scale;
    let magnitude = value.abs();
    let doubled = (magnitude * twice).round();

    // The fused multiply-add is exact, so zero means magnitude is exactly
    // an odd multiple of half a unit in the last place shown.
    let is_tie = doubled % 2.0 == 1.0 && magnitude.mul_add(twice, -doubled) == 0.0;
    if !is_tie || doubled >= u64::MAX as f64 {
        return format!("{:.*}", decimals, value);
    }

    let units = (doubled as u64 + 1) / 2;
    let sign = if value < 0.0 { "-" } else { "" };
    if decimals == 0 {
        return format!("{}{}", sign, units);
    }
    let divisor = 10u64.pow(decimals as u32);
    format!(
        "{}{}.{:0width$}",
        sign,
        units / divisor,
        units % divisor,
        width = decimals
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(format_value_with_decimals(9.125, 2), "9.13");
        assert_eq!(format_value_with_decimals(-1.125, 2), "-1.13");
        assert_eq!(format_value_with_decimals(0.375, 2), "0.38");
        assert_eq!(format_value_with_decimals(2.5, 0), "3");
        assert_eq!(format_value_with_decimals(0.25, 1), "0.3");
    }

    #[test]
    fn test_non_ties_match_std() {
        assert_eq!(format_value_with_decimals(1.005, 2), "1.00");
        assert_eq!(format_value_with_decimals(9.5, 2), "9.50");
        assert_eq!(format_value_with_decimals(-6.0, 2), "-6.00");
        assert_eq!(format_value_with_decimals(8.66 - 2.223, 2), "6.44");
        assert_eq!(format_value_with_decimals(0.1 + 0.2, 2), "0.30");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value_with_decimals(f64::NAN, 2), "NaN");
        assert_eq!(format_value_with_decimals(f64::INFINITY, 2), "inf");
    }
}
