use chrono::Duration;

/// `"820 m"` below a kilometer, `"1.3 km"` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// `"< 1 min"`, `"42 min"`, `"2h 05min"`.
pub fn format_duration(d: Duration) -> String {
    let minutes = d.num_minutes();
    if minutes < 1 {
        "< 1 min".to_string()
    } else if minutes < 60 {
        format!("{} min", minutes)
    } else {
        format!("{}h {:02}min", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_distances_in_meters() {
        assert_eq!(format_distance(820.0), "820 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(0.0), "0 m");
    }

    #[test]
    fn long_distances_in_kilometers() {
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1300.0), "1.3 km");
        assert_eq!(format_distance(370_500.0), "370.5 km");
    }

    #[test]
    fn sub_minute_durations() {
        assert_eq!(format_duration(Duration::seconds(0)), "< 1 min");
        assert_eq!(format_duration(Duration::seconds(59)), "< 1 min");
    }

    #[test]
    fn minute_durations() {
        assert_eq!(format_duration(Duration::minutes(1)), "1 min");
        assert_eq!(format_duration(Duration::minutes(59)), "59 min");
    }

    #[test]
    fn hour_durations() {
        assert_eq!(format_duration(Duration::minutes(60)), "1h 00min");
        assert_eq!(format_duration(Duration::minutes(125)), "2h 05min");
    }
}
