use crate::models::Stats;

/// Response line written for every successful insert.
pub const INSERT_ACK: &str = "No output";

/// Response line for a query that matched no record.
pub const EMPTY_STATS_LINE: &str = "Min: 0.0, Max: 0.0, Mean: 0.0";

/// Format a severity with at most six fractional digits.
///
/// Rounds half-to-even on the exact binary value, then drops trailing zeros
/// and a dangling decimal point. NaN renders as `NaN` and infinities as `∞`.
///
/// # Examples
///
/// ```
/// use monitor_core::formatting::format_severity;
///
/// assert_eq!(format_severity(4.0), "4");
/// assert_eq!(format_severity(3.5), "3.5");
/// assert_eq!(format_severity(1.0 / 3.0), "0.333333");
/// assert_eq!(format_severity(2.0 / 3.0), "0.666667");
/// assert_eq!(format_severity(-2.5), "-2.5");
/// assert_eq!(format_severity(0.1 + 0.2), "0.3");
/// ```
pub fn format_severity(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Render a [`Stats`] value as a response line.
///
/// Statistics with no contributing record use the literal zero line.
///
/// # Examples
///
/// ```
/// use monitor_core::formatting::format_stats;
/// use monitor_core::models::Stats;
///
/// let stats = Stats { min: 3.0, max: 5.0, mean: 4.0, count: 2 };
/// assert_eq!(format_stats(&stats), "Min: 3, Max: 5, Mean: 4");
/// assert_eq!(format_stats(&Stats::EMPTY), "Min: 0.0, Max: 0.0, Mean: 0.0");
/// ```
pub fn format_stats(stats: &Stats) -> String {
    if stats.is_empty() {
        return EMPTY_STATS_LINE.to_string();
    }
    format!(
        "Min: {}, Max: {}, Mean: {}",
        format_severity(stats.min),
        format_severity(stats.max),
        format_severity(stats.mean)
    )
}

/// Response line for a category that has never been inserted.
pub fn format_not_found(category: &str) -> String {
    format!("No entries for log type: {}", category)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_severity ──────────────────────────────────────────────────────

    #[test]
    fn test_format_severity_integer_drops_point() {
        assert_eq!(format_severity(5.0), "5");
        assert_eq!(format_severity(100.0), "100");
        assert_eq!(format_severity(0.0), "0");
    }

    #[test]
    fn test_format_severity_trims_trailing_zeros() {
        assert_eq!(format_severity(2.50), "2.5");
        assert_eq!(format_severity(0.125), "0.125");
    }

    #[test]
    fn test_format_severity_caps_at_six_digits() {
        assert_eq!(format_severity(1.23456789), "1.234568");
        assert_eq!(format_severity(0.0000001), "0");
    }

    #[test]
    fn test_format_severity_negative() {
        assert_eq!(format_severity(-1.75), "-1.75");
        assert_eq!(format_severity(-10.0), "-10");
    }

    #[test]
    fn test_format_severity_large_value_has_no_grouping() {
        assert_eq!(format_severity(1_234_567.5), "1234567.5");
    }

    #[test]
    fn test_format_severity_special_values() {
        assert_eq!(format_severity(f64::NAN), "NaN");
        assert_eq!(format_severity(f64::INFINITY), "∞");
        assert_eq!(format_severity(f64::NEG_INFINITY), "-∞");
    }

    // ── format_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_stats_fractional_mean() {
        let stats = Stats {
            min: 1.0,
            max: 2.0,
            mean: 4.0 / 3.0,
            count: 3,
        };
        assert_eq!(format_stats(&stats), "Min: 1, Max: 2, Mean: 1.333333");
    }

    #[test]
    fn test_format_stats_empty_uses_literal_zero_line() {
        assert_eq!(format_stats(&Stats::EMPTY), EMPTY_STATS_LINE);
    }

    #[test]
    fn test_format_stats_genuine_zero_severity() {
        let stats = Stats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            count: 1,
        };
        assert_eq!(format_stats(&stats), "Min: 0, Max: 0, Mean: 0");
    }

    // ── format_not_found ─────────────────────────────────────────────────────

    #[test]
    fn test_format_not_found() {
        assert_eq!(format_not_found("ERROR"), "No entries for log type: ERROR");
    }
}
