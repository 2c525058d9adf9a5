//! Display formatting helpers for the table UI.
//!
//! Pure functions only; the aggregation engine never depends on these for
//! its own math.

/// Format a duration in milliseconds as `minutes:seconds`, seconds
/// zero-padded to two digits (125000 ms -> "2:05").
pub fn format_duration(millis: i64) -> String {
    let total_secs = millis / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Thousands-separated display form of a metric value.
/// Non-finite values (zero-duration DPS and friends) render as "-".
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_pads_seconds() {
        assert_eq!(format_duration(125_000), "2:05");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(599_999), "9:59");
    }

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_234_567.4), "1,234,567");
        assert_eq!(format_number(-45_000.0), "-45,000");
    }

    #[test]
    fn non_finite_values_render_as_dash() {
        assert_eq!(format_number(f64::NAN), "-");
        assert_eq!(format_number(f64::INFINITY), "-");
    }
}
