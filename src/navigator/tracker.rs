use std::collections::VecDeque;

use chrono::Utc;

use super::types::{Fix, NavigationState, TrackerConfig};
use crate::geo::{
    bearing_deg, closest_point_on_route, distance_m, eta_at, instant_speed_kmh,
    remaining_distance_m, route_length_m, smooth_position, GeoPoint,
};
use crate::hazards::HazardCatalog;

/// Live-tracking state machine for one vessel on one route.
///
/// Owns a bounded FIFO of recent fixes plus the two scalars carried across
/// updates (last heading, last smoothed speed). Every [`apply_fix`] call
/// derives a fresh [`NavigationState`]; degenerate input (empty route,
/// single fix) yields neutral values rather than errors.
///
/// [`apply_fix`]: PositionTracker::apply_fix
pub struct PositionTracker {
    route: Vec<GeoPoint>,
    catalog: HazardCatalog,
    config: TrackerConfig,
    history: VecDeque<Fix>,
    heading_deg: f64,
    speed_kmh: f64,
    route_length_m: f64,
    last_state: Option<NavigationState>,
}

impl PositionTracker {
    pub fn new(route: Vec<GeoPoint>, catalog: HazardCatalog) -> Self {
        Self::with_config(route, catalog, TrackerConfig::default())
    }

    pub fn with_config(route: Vec<GeoPoint>, catalog: HazardCatalog, config: TrackerConfig) -> Self {
        let route_length_m = route_length_m(&route);
        Self {
            route,
            catalog,
            config,
            history: VecDeque::with_capacity(config.history_capacity),
            heading_deg: 0.0,
            speed_kmh: 0.0,
            route_length_m,
            last_state: None,
        }
    }

    /// Most recent derived state, if any fix has been applied.
    pub fn latest(&self) -> Option<&NavigationState> {
        self.last_state.as_ref()
    }

    /// Stamp a raw coordinate with the current time and apply it.
    pub fn update_position(&mut self, raw: GeoPoint) -> NavigationState {
        self.apply_fix(Fix {
            position: raw,
            timestamp: Utc::now(),
        })
    }

    /// Consume one fix and derive the next navigation state.
    pub fn apply_fix(&mut self, fix: Fix) -> NavigationState {
        self.history.push_back(fix);
        if self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }

        let positions: Vec<GeoPoint> = self.history.iter().map(|f| f.position).collect();
        let position =
            smooth_position(&positions, self.config.smoothing_window).unwrap_or(fix.position);

        if self.history.len() >= 2 {
            let prev = self.history[self.history.len() - 2];

            // Heading only moves once the vessel has moved; below the
            // displacement floor GPS noise dominates the bearing.
            let displacement = distance_m(prev.position, fix.position);
            if displacement > self.config.heading_min_displacement_m {
                self.heading_deg = bearing_deg(prev.position, fix.position);
            }

            let elapsed = (fix.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
            if elapsed > 0.0 {
                let instant = instant_speed_kmh(prev.position, fix.position, elapsed);
                let alpha = self.config.speed_smoothing_alpha;
                self.speed_kmh = self.speed_kmh * (1.0 - alpha) + instant * alpha;
            }
        }

        let (off_route, distance_remaining_m, route_progress) =
            match closest_point_on_route(position, &self.route) {
                Some(projection) => {
                    let off_route = projection.distance_m > self.config.off_route_threshold_m;
                    let remaining =
                        remaining_distance_m(&self.route, projection.segment_index, projection.point);
                    let progress = if self.route_length_m > 0.0 {
                        ((self.route_length_m - remaining) / self.route_length_m).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    (off_route, remaining, progress)
                }
                None => (false, 0.0, 0.0),
            };

        let hazards = self
            .catalog
            .nearby(position, self.config.hazard_alert_radius_m);

        let state = NavigationState {
            timestamp: fix.timestamp,
            position,
            heading_deg: self.heading_deg,
            speed_kmh: self.speed_kmh,
            distance_remaining_m,
            eta: eta_at(fix.timestamp, distance_remaining_m, self.speed_kmh),
            off_route,
            route_progress,
            hazards,
        };

        self.last_state = Some(state.clone());
        state
    }
}
