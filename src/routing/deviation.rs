//! Route deviation tracking.
//!
//! Given a previously computed route and the user's current position,
//! decides whether the user is still on the route and, if so, how much of
//! it remains. The replan decision itself lives on the `Wayfinder` facade,
//! which owns access to the waypoint pathfinder.

use crate::geo::{Point, segment_distance};
use crate::model::RoutePoint;

/// Deviation threshold used when the caller does not supply one, in map
/// units.
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 50.0;

/// Where the current position sits relative to a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    /// Distance to the nearest route segment.
    pub distance: f64,
    /// Index of the segment that achieved it; segment `i` joins route
    /// points `i` and `i + 1`.
    pub segment: usize,
}

/// Minimum clamped point-to-segment distance over every consecutive
/// segment of `route`.
///
/// Returns `None` for routes with fewer than two points, which have no
/// segments to measure against. Ties keep the earliest segment.
pub fn nearest_segment(route: &[RoutePoint], position: Point) -> Option<Deviation> {
    if route.len() < 2 {
        return None;
    }
    let mut best = Deviation { distance: f64::INFINITY, segment: 0 };
    for (i, pair) in route.windows(2).enumerate() {
        let distance = segment_distance(position, pair[0].position, pair[1].position);
        if distance < best.distance {
            best = Deviation { distance, segment: i };
        }
    }
    Some(best)
}

/// Truncate `route` to the portion ahead of the matched segment, prefixed
/// with the current position tagged as the new start.
///
/// The final point is re-tagged as the destination regardless of its
/// original tag.
pub fn remaining_route(route: &[RoutePoint], position: Point, segment: usize) -> Vec<RoutePoint> {
    let mut remaining = Vec::with_capacity(route.len() + 1);
    remaining.push(RoutePoint::start(position));

    let resume = (segment + 1).min(route.len() - 1);
    let last = route.len() - 1;
    for (i, point) in route.iter().enumerate().skip(resume) {
        remaining.push(if i == last {
            RoutePoint::destination(point.position)
        } else {
            RoutePoint::waypoint(point.position)
        });
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoutePointKind;

    fn route(points: &[(f64, f64)]) -> Vec<RoutePoint> {
        let last = points.len() - 1;
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let p = Point::new(x, y);
                match i {
                    0 => RoutePoint::start(p),
                    i if i == last => RoutePoint::destination(p),
                    _ => RoutePoint::waypoint(p),
                }
            })
            .collect()
    }

    #[test]
    fn test_on_segment_distance_is_zero() {
        let prev = route(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let dev = nearest_segment(&prev, Point::new(5.0, 0.0)).unwrap();

        assert_eq!(dev.distance, 0.0);
        assert_eq!(dev.segment, 0);
    }

    #[test]
    fn test_nearest_segment_picks_closest() {
        let prev = route(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let dev = nearest_segment(&prev, Point::new(9.0, 8.0)).unwrap();

        assert_eq!(dev.segment, 1);
        assert_eq!(dev.distance, 1.0);
    }

    #[test]
    fn test_short_route_has_no_segments() {
        let prev = route(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(nearest_segment(&prev[..1], Point::new(0.0, 0.0)).is_none());
        assert!(nearest_segment(&[], Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_remaining_route_truncates_and_retags() {
        let prev = route(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        let remaining = remaining_route(&prev, Point::new(5.0, 1.0), 0);

        // Current position, then everything after segment 0.
        assert_eq!(remaining.len(), 4);
        assert_eq!(remaining[0].kind, RoutePointKind::Start);
        assert_eq!(remaining[0].position, Point::new(5.0, 1.0));
        assert_eq!(remaining[1].position, Point::new(10.0, 0.0));
        assert_eq!(remaining[1].kind, RoutePointKind::Waypoint);
        assert_eq!(remaining[3].kind, RoutePointKind::Destination);
    }

    #[test]
    fn test_remaining_route_on_last_segment() {
        let prev = route(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let remaining = remaining_route(&prev, Point::new(15.0, 0.0), 1);

        // Only the destination remains ahead.
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1].position, Point::new(20.0, 0.0));
        assert_eq!(remaining[1].kind, RoutePointKind::Destination);
    }
}
