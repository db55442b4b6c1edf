//! In-memory map provider.
//!
//! This is the reference implementation of `MapProvider`: plain maps
//! protected by RwLock.
//!
//! ## Limitations
//!
//! - **No persistence**: everything lives in process memory.
//! - **Whole-scope clones**: every query clones its scope's collection, so
//!   it suits test fixtures and small embedded maps, not large
//!   deployments.
//!
//! Use this provider for:
//! - Testing the routing and positioning engines
//! - Embedding small maps in applications that don't need a database

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::{Beacon, BeaconId, Building, Floor, GraphEdge, GraphNode, NavNode};
use crate::provider::MapProvider;
use crate::{Error, Result};

// ============================================================================
// MemoryProvider
// ============================================================================

/// In-memory map storage.
#[derive(Clone, Default)]
pub struct MemoryProvider {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    buildings: RwLock<HashMap<String, Building>>,
    floors: RwLock<HashMap<String, Floor>>,
    beacons: RwLock<HashMap<BeaconId, Beacon>>,
    /// (building_id, floor_id) → nodes
    graph_nodes: RwLock<HashMap<(String, String), Vec<GraphNode>>>,
    /// (building_id, floor_id) → edges
    graph_edges: RwLock<HashMap<(String, String), Vec<GraphEdge>>>,
    /// floor_id → nodes
    nav_nodes: RwLock<HashMap<String, Vec<NavNode>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a building, replacing any existing record with the same id.
    pub fn add_building(&self, building: Building) {
        self.inner
            .buildings
            .write()
            .insert(building.building_id.clone(), building);
    }

    /// Register a floor, replacing any existing record with the same id.
    pub fn add_floor(&self, floor: Floor) {
        self.inner.floors.write().insert(floor.floor_id.clone(), floor);
    }

    /// Register a beacon. The identifier triple must be unique.
    pub fn add_beacon(&self, beacon: Beacon) -> Result<()> {
        let mut beacons = self.inner.beacons.write();
        if beacons.contains_key(&beacon.id) {
            return Err(Error::ConstraintViolation(format!(
                "beacon {} is already registered",
                beacon.id
            )));
        }
        beacons.insert(beacon.id.clone(), beacon);
        Ok(())
    }

    /// Register an explicit-graph node. The node id must be unique within
    /// its (building, floor) pair.
    pub fn add_graph_node(&self, node: GraphNode) -> Result<()> {
        let key = (node.building_id.clone(), node.floor_id.clone());
        let mut scopes = self.inner.graph_nodes.write();
        let scope = scopes.entry(key).or_default();
        if scope.iter().any(|n| n.node_id == node.node_id) {
            return Err(Error::ConstraintViolation(format!(
                "node {} already exists on {}/{}",
                node.node_id, node.building_id, node.floor_id
            )));
        }
        scope.push(node);
        Ok(())
    }

    /// Register an explicit-graph edge between two known nodes.
    ///
    /// The weight is computed here, once, as the Euclidean distance between
    /// the endpoints' current positions, and frozen on the stored edge.
    pub fn add_graph_edge(
        &self,
        edge_id: impl Into<String>,
        from_node: &str,
        to_node: &str,
        building_id: &str,
        floor_id: &str,
    ) -> Result<GraphEdge> {
        let key = (building_id.to_string(), floor_id.to_string());
        let nodes = self.inner.graph_nodes.read();
        let scope = nodes
            .get(&key)
            .ok_or_else(|| Error::NotFound(format!("no nodes on {building_id}/{floor_id}")))?;
        let find = |id: &str| {
            scope
                .iter()
                .find(|n| n.node_id == id)
                .ok_or_else(|| Error::NotFound(format!("node {id} on {building_id}/{floor_id}")))
        };
        let from = find(from_node)?;
        let to = find(to_node)?;

        let edge = GraphEdge::new(
            edge_id,
            from_node,
            to_node,
            building_id,
            floor_id,
            from.position.distance(to.position),
        );
        drop(nodes);

        self.inner
            .graph_edges
            .write()
            .entry(key)
            .or_default()
            .push(edge.clone());
        Ok(edge)
    }

    /// Register a waypoint-graph node.
    pub fn add_nav_node(&self, node: NavNode) {
        self.inner
            .nav_nodes
            .write()
            .entry(node.floor_id.clone())
            .or_default()
            .push(node);
    }
}

// ============================================================================
// MapProvider impl
// ============================================================================

#[async_trait]
impl MapProvider for MemoryProvider {
    async fn graph_nodes(&self, building_id: &str, floor_id: &str) -> Result<Vec<GraphNode>> {
        let key = (building_id.to_string(), floor_id.to_string());
        Ok(self.inner.graph_nodes.read().get(&key).cloned().unwrap_or_default())
    }

    async fn graph_edges(&self, building_id: &str, floor_id: &str) -> Result<Vec<GraphEdge>> {
        let key = (building_id.to_string(), floor_id.to_string());
        Ok(self.inner.graph_edges.read().get(&key).cloned().unwrap_or_default())
    }

    async fn nav_nodes(&self, floor_id: &str) -> Result<Vec<NavNode>> {
        Ok(self.inner.nav_nodes.read().get(floor_id).cloned().unwrap_or_default())
    }

    async fn beacon(&self, id: &BeaconId) -> Result<Option<Beacon>> {
        Ok(self.inner.beacons.read().get(id).cloned())
    }

    async fn floor(&self, floor_id: &str) -> Result<Option<Floor>> {
        Ok(self.inner.floors.read().get(floor_id).cloned())
    }

    async fn building(&self, building_id: &str) -> Result<Option<Building>> {
        Ok(self.inner.buildings.read().get(building_id).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================
