//! HH:MM:SS rendering of a second count

/// Format a number of seconds as `HH:MM:SS`.
///
/// Each field is zero-padded to two digits. Hours are not wrapped at 24 and
/// grow past two digits when needed.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn formats_basic_values() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(60), "00:01:00");
        assert_eq!(format_time(3661), "01:01:01");
    }

    #[test]
    fn hours_are_not_clamped() {
        assert_eq!(format_time(24 * 3600), "24:00:00");
        assert_eq!(format_time(100 * 3600 + 5), "100:00:05");
    }
}
