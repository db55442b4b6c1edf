//! # wayfinder-rs — Indoor Positioning & Wayfinding Engine
//!
//! Locates a mobile user inside a building from BLE beacon signal strengths
//! and computes walking routes over floor graphs.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `MapProvider` is the contract between the engines and storage
//! 2. **Clean DTOs**: `Point`, `RoutePlan`, `PositionEstimate` cross all boundaries
//! 3. **Pure core**: every engine is a pure function over a snapshot fetched at call time
//! 4. **Degrade, don't fail**: routing falls back to a direct line, positioning
//!    to simpler estimators, before anything becomes an error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wayfinder_rs::{Wayfinder, Beacon, BeaconId, Floor, Point, ScannedBeacon};
//!
//! # async fn example() -> wayfinder_rs::Result<()> {
//! let finder = Wayfinder::open_memory();
//! finder.provider().add_floor(Floor::new("F1", "HQ", 1, "Ground floor", 800, 600, 10.0));
//! finder.provider().add_beacon(Beacon::new(
//!     "HQ",
//!     "F1",
//!     BeaconId::new("E2C56DB5-DFFB-48D2-B060-D0F5A71096E0", 1, 1),
//!     Point::new(120.0, 80.0),
//! ))?;
//!
//! let estimate = finder
//!     .locate(&[ScannedBeacon::new(
//!         BeaconId::new("e2c56db5-dffb-48d2-b060-d0f5a71096e0", 1, 1),
//!         -61,
//!     )])
//!     .await?;
//! println!("{estimate:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Engines
//!
//! | Engine | Module | Description |
//! |--------|--------|-------------|
//! | Shortest path | `routing::dijkstra` | Dijkstra over the explicit edge graph |
//! | Waypoint route | `routing::astar` | A* over on-node adjacency, direct-line fallback |
//! | Deviation | `routing::deviation` | Keep or replan an in-progress route |
//! | Positioning | `positioning` | Beacon matching, floor selection, trilateration |

// ============================================================================
// Modules
// ============================================================================

pub mod geo;
pub mod model;
pub mod positioning;
pub mod provider;
pub mod routing;

use tracing::{debug, info};

// ============================================================================
// Re-exports: Geometry and model (the DTOs)
// ============================================================================

pub use geo::Point;
pub use model::{
    Beacon, BeaconId, Building, Floor, GraphEdge, GraphNode, NavNode, NavNodeKind,
    PositionEstimate, PositionFix, PositionMethod, RoutePlan, RoutePoint, RoutePointKind,
    ScannedBeacon, route_length,
};

// ============================================================================
// Re-exports: Provider
// ============================================================================

pub use provider::{MapProvider, MemoryProvider};

// ============================================================================
// Re-exports: Engine knobs
// ============================================================================

pub use positioning::RSSI_FLOOR;
pub use routing::deviation::{DEFAULT_DEVIATION_THRESHOLD, Deviation};

// ============================================================================
// Top-level Wayfinder handle
// ============================================================================

/// The primary entry point. A `Wayfinder` wraps a map data provider and
/// exposes the positioning and routing operations.
///
/// Every operation fetches the graph/beacon snapshot it needs from the
/// provider, then runs a pure computation over it. No state is held between
/// calls, so a single `Wayfinder` can serve concurrent requests.
pub struct Wayfinder<P: MapProvider> {
    provider: P,
}

impl<P: MapProvider> Wayfinder<P> {
    /// Create a Wayfinder with the given provider.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Estimate the user's position from a beacon scan.
    ///
    /// Domain failures (nothing matched, unknown floor) are reported as
    /// [`PositionEstimate::Invalid`]; `Err` is reserved for provider
    /// failures.
    pub async fn locate(&self, scans: &[ScannedBeacon]) -> Result<PositionEstimate> {
        positioning::estimate_position(&self.provider, scans).await
    }

    /// Shortest walking path over the explicit edge graph of a building
    /// floor, anchored to the literal query coordinates.
    pub async fn shortest_path(
        &self,
        building_id: &str,
        floor_id: &str,
        from: Point,
        to: Point,
    ) -> Result<Vec<Point>> {
        let nodes = self.provider.graph_nodes(building_id, floor_id).await?;
        let edges = self.provider.graph_edges(building_id, floor_id).await?;
        routing::dijkstra::shortest_path(&nodes, &edges, from, to)
    }

    /// Waypoint route across a floor. Degrades to a direct two-point route
    /// when the floor has no waypoint graph or the graph does not connect
    /// the endpoints.
    pub async fn route(&self, floor_id: &str, start: Point, dest: Point) -> Result<RoutePlan> {
        let nodes = self.provider.nav_nodes(floor_id).await?;
        Ok(routing::astar::plan_route(&nodes, start, dest))
    }

    /// Decide whether an in-progress route is still worth following.
    ///
    /// If the current position lies within `threshold` (default
    /// [`DEFAULT_DEVIATION_THRESHOLD`]) of the previous route, the route is
    /// truncated to the portion ahead of the user. Otherwise a fresh
    /// waypoint route is planned from the current position.
    pub async fn recalculate(
        &self,
        floor_id: &str,
        current: Point,
        dest: Point,
        previous_route: &[RoutePoint],
        threshold: Option<f64>,
    ) -> Result<RoutePlan> {
        let threshold = threshold.unwrap_or(DEFAULT_DEVIATION_THRESHOLD);

        // Fewer than two points is not a route; plan from scratch.
        let Some(deviation) = routing::deviation::nearest_segment(previous_route, current) else {
            return self.route(floor_id, current, dest).await;
        };

        if deviation.distance <= threshold {
            let route = routing::deviation::remaining_route(
                previous_route,
                current,
                deviation.segment,
            );
            let total_distance = route_length(&route);
            debug!(distance = deviation.distance, "still on route");
            return Ok(RoutePlan {
                success: true,
                message: "On route (no recalculation needed)".into(),
                total_distance,
                route,
            });
        }

        info!(
            distance = deviation.distance,
            threshold, "deviation exceeds threshold, replanning"
        );
        let mut plan = self.route(floor_id, current, dest).await?;
        plan.message = format!("Route recalculated (deviation {:.1})", deviation.distance);
        Ok(plan)
    }

    /// Access the underlying provider (for registration or advanced use).
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// In-memory wayfinder for testing and embedding.
impl Wayfinder<MemoryProvider> {
    pub fn open_memory() -> Self {
        Self::with_provider(MemoryProvider::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
