//! Number labels: compact (`1.5K`, `2.5M`) and long space-grouped (`1 234 567`).

use num_format::{Locale, ToFormattedString};

/// Compact form with a `K`/`M` suffix.
///
/// The scaled value keeps two decimals up to 100, whole numbers up to 1000,
/// and tens beyond that.
pub fn format_short(x: f64) -> String {
    let (n, suffix) = if x >= 1_000_000.0 {
        (x / 1_000_000.0, "M")
    } else if x >= 1000.0 {
        (x / 1000.0, "K")
    } else {
        (x, "")
    };
    let rounded = if n > 1000.0 {
        (n / 10.0).round() * 10.0
    } else if n > 100.0 {
        n.round()
    } else {
        (n * 100.0).round() / 100.0
    };
    format!("{rounded}{suffix}")
}

/// Rounded integer with a space every three digits.
pub fn format_long(x: f64) -> String {
    // en groups by three with ',' and contains no other commas
    (x.round() as i64)
        .to_formatted_string(&Locale::en)
        .replace(',', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_magnitudes() {
        assert_eq!(format_short(999.0), "999");
        assert_eq!(format_short(1500.0), "1.5K");
        assert_eq!(format_short(2_500_000.0), "2.5M");
        assert_eq!(format_short(0.0), "0");
        assert_eq!(format_short(49.504950495), "49.5");
        assert_eq!(format_short(416.33), "416");
        assert_eq!(format_short(9_507_000.0), "9.51M");
        assert_eq!(format_short(2_013_623_970.0), "2010M");
    }

    #[test]
    fn long_grouping() {
        assert_eq!(format_long(1_234_567.0), "1 234 567");
        assert_eq!(format_long(999.4), "999");
        assert_eq!(format_long(1000.0), "1 000");
        assert_eq!(format_long(0.0), "0");
        assert_eq!(format_long(123_456.6), "123 457");
        assert_eq!(format_long(-1_234.0), "-1 234");
        assert!(format_long(9_507_000.0).chars().all(|c| c.is_ascii_digit() || c == ' '));
    }
}
