//! # Wayfinding Data Model
//!
//! Clean DTOs that cross every boundary: provider ↔ engines ↔ caller.
//! This module is pure data — no I/O, no state, no async.

pub mod beacon;
pub mod graph;
pub mod nav;
pub mod place;
pub mod position;
pub mod route;

pub use beacon::{Beacon, BeaconId, ScannedBeacon};
pub use graph::{GraphEdge, GraphNode};
pub use nav::{NavNode, NavNodeKind};
pub use place::{Building, Floor};
pub use position::{PositionEstimate, PositionFix, PositionMethod};
pub use route::{RoutePlan, RoutePoint, RoutePointKind, route_length};
