use chrono::{DateTime, Duration, Utc};

use super::point::{distance_m, GeoPoint};

/// Below this smoothed speed an ETA is meaningless GPS noise.
pub const MIN_ETA_SPEED_KMH: f64 = 2.0;

/// Arithmetic mean of latitude and longitude over the last `window` points.
///
/// Not geodesically correct over large spans; consecutive fixes are seconds
/// and meters apart, where the error is negligible. Returns `None` for an
/// empty slice.
pub fn smooth_position(history: &[GeoPoint], window: usize) -> Option<GeoPoint> {
    if history.is_empty() || window == 0 {
        return None;
    }

    let tail = &history[history.len().saturating_sub(window)..];
    let n = tail.len() as f64;
    let lat = tail.iter().map(|p| p.lat).sum::<f64>() / n;
    let lon = tail.iter().map(|p| p.lon).sum::<f64>() / n;

    Some(GeoPoint::new(lat, lon))
}

/// Instantaneous speed between two fixes in km/h. Zero when the elapsed time
/// is not positive (clock skew, duplicated timestamps).
pub fn instant_speed_kmh(prev: GeoPoint, curr: GeoPoint, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    distance_m(prev, curr) / elapsed_secs * 3.6
}

/// Estimated arrival time, or `None` when the vessel is effectively
/// stationary (below [`MIN_ETA_SPEED_KMH`]).
pub fn eta_at(now: DateTime<Utc>, remaining_m: f64, speed_kmh: f64) -> Option<DateTime<Utc>> {
    if speed_kmh < MIN_ETA_SPEED_KMH {
        return None;
    }
    let secs = remaining_m / 1000.0 / speed_kmh * 3600.0;
    Some(now + Duration::milliseconds((secs * 1000.0) as i64))
}
