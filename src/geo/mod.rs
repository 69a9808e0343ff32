//! Pure geometry over WGS84 coordinates: distances, bearings, route
//! projection, motion smoothing, and display formatting. No state, no I/O.

mod format;
mod motion;
mod point;
mod route;

pub use format::{format_distance, format_duration};
pub use motion::{eta_at, instant_speed_kmh, smooth_position, MIN_ETA_SPEED_KMH};
pub use point::{bearing_deg, distance_m, GeoPoint, EARTH_RADIUS_M};
pub use route::{
    closest_point_on_route, project_onto_segment, remaining_distance_m, route_length_m,
    RouteProjection,
};
