//! Time formatting helpers for track positions

/// Format a millisecond offset as `mm:ss`
///
/// Minutes are not wrapped at an hour; a 90-minute radio show renders as
/// `90:00`.
pub fn to_mmss(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(to_mmss(0), "00:00");
    }

    #[test]
    fn truncates_sub_second_remainder() {
        assert_eq!(to_mmss(999), "00:00");
        assert_eq!(to_mmss(1_000), "00:01");
    }

    #[test]
    fn formats_typical_track_lengths() {
        assert_eq!(to_mmss(269_000), "04:29");
        assert_eq!(to_mmss(3_600_000), "60:00");
    }
}
