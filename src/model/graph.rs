//! Explicit node/edge graph, keyed by building + floor.

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// A node of the explicit floor graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique within its (building, floor) pair.
    pub node_id: String,
    pub building_id: String,
    pub floor_id: String,
    pub position: Point,
}

impl GraphNode {
    pub fn new(
        node_id: impl Into<String>,
        building_id: impl Into<String>,
        floor_id: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            building_id: building_id.into(),
            floor_id: floor_id.into(),
            position,
        }
    }
}

/// An edge of the explicit floor graph.
///
/// Stored with a from/to order but treated as undirected by the shortest
/// path engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub edge_id: String,
    pub from_node: String,
    pub to_node: String,
    pub building_id: String,
    pub floor_id: String,
    /// Euclidean distance between the endpoints at creation time, ≥ 0.
    /// Never recomputed: moving a node afterwards leaves the weight as
    /// imported, and an explicit re-import is the supported way to refresh
    /// it.
    pub weight: f64,
}

impl GraphEdge {
    pub fn new(
        edge_id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        building_id: impl Into<String>,
        floor_id: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            edge_id: edge_id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            building_id: building_id.into(),
            floor_id: floor_id.into(),
            weight,
        }
    }
}
