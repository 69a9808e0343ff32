use serde::Serialize;

use super::point::{distance_m, GeoPoint};

/// Result of projecting a position onto a route polyline.
#[derive(Debug, Clone, Serialize)]
pub struct RouteProjection {
    /// Index of the segment start point (0-based).
    pub segment_index: usize,
    /// Nearest point on the route.
    pub point: GeoPoint,
    /// Haversine distance from the position to `point`, in meters.
    pub distance_m: f64,
}

/// Total polyline length in meters. Zero for empty or single-point routes.
pub fn route_length_m(route: &[GeoPoint]) -> f64 {
    route.windows(2).map(|w| distance_m(w[0], w[1])).sum()
}

/// Orthogonal projection of `p` onto the segment [a, b], clamped to the
/// segment endpoints.
///
/// Works in the raw (lon, lat) plane treated as locally Euclidean. That is a
/// deliberate precision trade-off: river route segments are at most a few
/// kilometers long, where the planar error is far below GPS noise.
pub fn project_onto_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> GeoPoint {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;

    let seg_len_sq = dx * dx + dy * dy;
    if seg_len_sq == 0.0 {
        // Zero-length segment
        return a;
    }

    let px = p.lon - a.lon;
    let py = p.lat - a.lat;
    let t = ((px * dx + py * dy) / seg_len_sq).clamp(0.0, 1.0);

    GeoPoint::new(a.lat + t * dy, a.lon + t * dx)
}

/// Scan every segment of `route` and return the globally closest projection
/// of `p`. Ties keep the first segment reaching the minimum. `None` when the
/// route has fewer than 2 points.
pub fn closest_point_on_route(p: GeoPoint, route: &[GeoPoint]) -> Option<RouteProjection> {
    if route.len() < 2 {
        return None;
    }

    let mut best: Option<RouteProjection> = None;

    for (i, seg) in route.windows(2).enumerate() {
        let projected = project_onto_segment(p, seg[0], seg[1]);
        let dist = distance_m(p, projected);

        let closer = match &best {
            Some(prev) => dist < prev.distance_m,
            None => true,
        };
        if closer {
            best = Some(RouteProjection {
                segment_index: i,
                point: projected,
                distance_m: dist,
            });
        }
    }

    best
}

/// Distance from a projected point to the end of the route: the rest of its
/// own segment plus every segment after it.
pub fn remaining_distance_m(route: &[GeoPoint], segment_index: usize, projected: GeoPoint) -> f64 {
    if route.len() < 2 || segment_index + 1 >= route.len() {
        return 0.0;
    }

    let mut remaining = distance_m(projected, route[segment_index + 1]);
    for seg in route[segment_index + 1..].windows(2) {
        remaining += distance_m(seg[0], seg[1]);
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn length_of_degenerate_routes_is_zero() {
        assert_eq!(route_length_m(&[]), 0.0);
        assert_eq!(route_length_m(&[pt(-3.1, -60.0)]), 0.0);
    }

    #[test]
    fn length_sums_consecutive_segments() {
        let route = vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)];
        let len = route_length_m(&route);
        // ~111 km per equatorial degree of longitude
        assert!(len > 220_000.0 && len < 224_000.0, "got {:.0} m", len);
    }

    #[test]
    fn projection_onto_midpoint() {
        let proj = project_onto_segment(pt(1.0, 5.0), pt(0.0, 0.0), pt(0.0, 10.0));
        assert!((proj.lat - 0.0).abs() < 1e-12);
        assert!((proj.lon - 5.0).abs() < 1e-12);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let a = pt(0.0, 0.0);
        let b = pt(0.0, 10.0);
        let before = project_onto_segment(pt(0.5, -3.0), a, b);
        assert_eq!(before, a);
        let after = project_onto_segment(pt(-0.5, 13.0), a, b);
        assert_eq!(after, b);
    }

    #[test]
    fn projection_onto_zero_length_segment_returns_endpoint() {
        let a = pt(2.0, 2.0);
        assert_eq!(project_onto_segment(pt(3.0, 3.0), a, a), a);
    }

    #[test]
    fn closest_point_matches_perpendicular_distance() {
        let route = vec![pt(0.0, 0.0), pt(0.0, 10.0)];
        let query = pt(1.0, 5.0);

        let result = closest_point_on_route(query, &route).unwrap();
        assert_eq!(result.segment_index, 0);
        assert!((result.point.lat - 0.0).abs() < 1e-9);
        assert!((result.point.lon - 5.0).abs() < 1e-9);
        assert!((result.distance_m - distance_m(query, pt(0.0, 5.0))).abs() < 1e-6);
    }

    #[test]
    fn closest_point_picks_later_segment() {
        // L-shaped route: east, then north
        let route = vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0)];
        let result = closest_point_on_route(pt(0.5, 1.1), &route).unwrap();
        assert_eq!(result.segment_index, 1);
        assert!((result.point.lon - 1.0).abs() < 1e-9);
    }

    #[test]
    fn closest_point_on_short_route_is_none() {
        assert!(closest_point_on_route(pt(0.0, 0.0), &[]).is_none());
        assert!(closest_point_on_route(pt(0.0, 0.0), &[pt(0.0, 1.0)]).is_none());
    }

    #[test]
    fn remaining_distance_shrinks_along_route() {
        let route = vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)];

        let early = closest_point_on_route(pt(0.0, 0.25), &route).unwrap();
        let late = closest_point_on_route(pt(0.0, 1.75), &route).unwrap();

        let rem_early = remaining_distance_m(&route, early.segment_index, early.point);
        let rem_late = remaining_distance_m(&route, late.segment_index, late.point);

        assert!(rem_early > rem_late);
        // 1.75 degrees left of 2 at the start point
        assert!((rem_early - route_length_m(&route) * 0.875).abs() < 200.0);
    }

    #[test]
    fn remaining_distance_at_route_end_is_zero() {
        let route = vec![pt(0.0, 0.0), pt(0.0, 1.0)];
        let end = route[1];
        let rem = remaining_distance_m(&route, 0, end);
        assert!(rem.abs() < 1e-6);
    }
}
