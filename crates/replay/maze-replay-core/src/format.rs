//! Presentation helpers for seek bars and speed pickers.

/// `mm:ss.hh` with hundredths truncated. Minutes widen past 99.
/// Negative or non-finite input renders as `00:00.00`.
pub fn format_time(seconds: f32) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds as f64
    } else {
        0.0
    };
    // Nudge before truncating so 1.23 (stored as 1.2299999) still shows .23.
    let hundredths = (seconds * 100.0 + 1e-6).floor() as u64;
    let minutes = hundredths / 6000;
    let secs = (hundredths / 100) % 60;
    let frac = hundredths % 100;
    format!("{minutes:02}:{secs:02}.{frac:02}")
}

/// Speed multiplier label: `1x`, `0.5x`, `2.25x`.
pub fn format_speed(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    format!("{text}x")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_labels() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(1.23), "00:01.23");
        assert_eq!(format_time(61.5), "01:01.50");
        assert_eq!(format_time(599.999), "09:59.99");
        assert_eq!(format_time(6000.0), "100:00.00");
        assert_eq!(format_time(-3.0), "00:00.00");
        assert_eq!(format_time(f32::NAN), "00:00.00");
    }

    #[test]
    fn speed_labels() {
        assert_eq!(format_speed(1.0), "1x");
        assert_eq!(format_speed(0.5), "0.5x");
        assert_eq!(format_speed(2.25), "2.25x");
        assert_eq!(format_speed(10.0), "10x");
        assert_eq!(format_speed(0.1), "0.1x");
    }
}
