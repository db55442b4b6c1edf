//! Routes as ordered point sequences.

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// Role of a point within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePointKind {
    Start,
    Waypoint,
    Destination,
}

/// One point of a computed route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub position: Point,
    pub kind: RoutePointKind,
}

impl RoutePoint {
    pub fn start(position: Point) -> Self {
        Self { position, kind: RoutePointKind::Start }
    }

    pub fn waypoint(position: Point) -> Self {
        Self { position, kind: RoutePointKind::Waypoint }
    }

    pub fn destination(position: Point) -> Self {
        Self { position, kind: RoutePointKind::Destination }
    }
}

/// A computed route.
///
/// The first point is always the literal query start and the last the
/// literal query destination; intermediate points are graph waypoints.
/// `total_distance` is the segment sum over the returned points, so it
/// reflects the rendered path rather than any internal search score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub success: bool,
    pub message: String,
    pub total_distance: f64,
    pub route: Vec<RoutePoint>,
}

impl RoutePlan {
    /// Build a plan from an ordered point sequence, computing the segment
    /// sum.
    pub fn from_points(message: impl Into<String>, route: Vec<RoutePoint>) -> Self {
        let total_distance = route_length(&route);
        Self { success: true, message: message.into(), total_distance, route }
    }
}

/// Sum of consecutive segment lengths. Zero for fewer than two points.
pub fn route_length(route: &[RoutePoint]) -> f64 {
    route
        .windows(2)
        .map(|pair| pair[0].position.distance(pair[1].position))
        .sum()
}
