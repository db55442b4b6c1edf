//! # Map Data Provider
//!
//! This is the contract between the algorithmic core and whatever stores
//! the map. Engines fetch a snapshot immediately before computing and hold
//! nothing between calls; a snapshot only has to be internally consistent,
//! not globally fresh.
//!
//! ## Implementations
//!
//! | Provider | Module | Description |
//! |----------|--------|-------------|
//! | `MemoryProvider` | `memory` | In-memory maps for testing/embedding |

pub mod memory;

use async_trait::async_trait;

use crate::Result;
use crate::model::{Beacon, BeaconId, Building, Floor, GraphEdge, GraphNode, NavNode};

pub use memory::MemoryProvider;

/// Read-only queries the engines consume.
///
/// All methods return owned snapshots so a single invocation never
/// observes torn data, and providers are free to back them with a
/// database, a cache, or plain maps.
#[async_trait]
pub trait MapProvider: Send + Sync + 'static {
    /// All explicit-graph nodes for a building/floor scope.
    async fn graph_nodes(&self, building_id: &str, floor_id: &str) -> Result<Vec<GraphNode>>;

    /// All explicit-graph edges for a building/floor scope.
    async fn graph_edges(&self, building_id: &str, floor_id: &str) -> Result<Vec<GraphEdge>>;

    /// All waypoint-graph nodes for a floor.
    async fn nav_nodes(&self, floor_id: &str) -> Result<Vec<NavNode>>;

    /// Registered beacon with exactly this identifier triple.
    ///
    /// Lookup is exact; the positioning engine handles UUID case variants
    /// by querying more than once.
    async fn beacon(&self, id: &BeaconId) -> Result<Option<Beacon>>;

    /// Floor metadata.
    async fn floor(&self, floor_id: &str) -> Result<Option<Floor>>;

    /// Building metadata.
    async fn building(&self, building_id: &str) -> Result<Option<Building>>;
}
