//! Formatting utilities used for CLI and export outputs.

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Meters → "842 m" below one kilometer, "12.43 km" above.
pub fn format_distance_m(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Milliseconds → "HH:MM:SS".
pub fn format_duration_ms(ms: i64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Minutes-per-km → "5'12\"/km"; `None` (zero distance) → "-".
pub fn format_pace(pace_min_per_km: Option<f64>) -> String {
    match pace_min_per_km {
        Some(pace) if pace.is_finite() => {
            let total_secs = (pace * 60.0).round() as i64;
            format!("{}'{:02}\"/km", total_secs / 60, total_secs % 60)
        }
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rendering() {
        assert_eq!(format_distance_m(0.0), "0 m");
        assert_eq!(format_distance_m(842.3), "842 m");
        assert_eq!(format_distance_m(12_430.0), "12.43 km");
    }

    #[test]
    fn duration_rendering() {
        assert_eq!(format_duration_ms(0), "00:00:00");
        assert_eq!(format_duration_ms(61_000), "00:01:01");
        assert_eq!(format_duration_ms(3_723_000), "01:02:03");
    }

    #[test]
    fn pace_rendering() {
        assert_eq!(format_pace(None), "-");
        assert_eq!(format_pace(Some(5.2)), "5'12\"/km");
    }
}
