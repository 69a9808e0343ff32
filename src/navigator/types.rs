use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::hazards::HazardAlert;

/// One raw position sample from the device location service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fix {
    pub position: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

/// Tuning knobs of the tracker. The defaults encode domain judgment about
/// Amazonian river widths and GPS noise; override them deliberately, never
/// silently.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Raw fixes kept for smoothing, oldest evicted first.
    pub history_capacity: usize,
    /// Fixes averaged into the smoothed position.
    pub smoothing_window: usize,
    /// Minimum displacement between consecutive fixes before the heading is
    /// recomputed; below it the previous heading is retained.
    pub heading_min_displacement_m: f64,
    /// Weight of the newest sample in the exponential speed blend.
    pub speed_smoothing_alpha: f64,
    /// Distance from the route polyline beyond which the vessel is flagged
    /// off the navigable channel.
    pub off_route_threshold_m: f64,
    /// Standoff below which a hazard zone enters the alert list.
    pub hazard_alert_radius_m: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            smoothing_window: 5,
            heading_min_displacement_m: 15.0,
            speed_smoothing_alpha: 0.3,
            off_route_threshold_m: 1500.0,
            hazard_alert_radius_m: 2000.0,
        }
    }
}

/// Derived navigation snapshot, recomputed on every fix.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationState {
    pub timestamp: DateTime<Utc>,
    /// Smoothed position.
    pub position: GeoPoint,
    /// Compass heading in degrees [0, 360).
    pub heading_deg: f64,
    /// Exponentially smoothed speed in km/h.
    pub speed_kmh: f64,
    pub distance_remaining_m: f64,
    pub eta: Option<DateTime<Utc>>,
    pub off_route: bool,
    /// Fraction of the route completed, in [0, 1].
    pub route_progress: f64,
    /// Hazards within alert range, closest first.
    pub hazards: Vec<HazardAlert>,
}
