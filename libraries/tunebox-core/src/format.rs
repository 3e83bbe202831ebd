//! Compact number formatting for play and like counters

/// Format a counter for display
///
/// Below one thousand the exact value is printed; above that the value is
/// scaled to thousands (`K`) or millions (`M`) with one decimal place.
///
/// ```rust
/// use tunebox_core::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_500), "1.5K");
/// assert_eq!(format_count(2_500_000), "2.5M");
/// ```
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_below_thousand() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(12_340), "12.3K");
        assert_eq!(format_count(999_999), "1000.0K");
    }

    #[test]
    fn millions() {
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_500_000), "2.5M");
        assert_eq!(format_count(1_250_000_000), "1250.0M");
    }
}
