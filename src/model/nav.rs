//! Waypoint graph with adjacency stored on each node.
//!
//! A parallel, independent representation of the navigable floor: the
//! waypoint pathfinder reads neighbor ids directly off each node instead of
//! joining against an edge collection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geo::Point;

/// Role of a waypoint-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavNodeKind {
    Waypoint,
    Junction,
    Destination,
}

/// A node of the waypoint graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub node_id: String,
    pub floor_id: String,
    pub position: Point,
    /// Ids of directly reachable nodes on the same floor. Ids that do not
    /// resolve are treated as absent during pathfinding, not as errors.
    pub neighbors: SmallVec<[String; 4]>,
    /// Point of interest this node leads to, if it is a destination.
    pub poi_id: Option<String>,
    pub kind: NavNodeKind,
}

impl NavNode {
    pub fn new(
        node_id: impl Into<String>,
        floor_id: impl Into<String>,
        position: Point,
        kind: NavNodeKind,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            floor_id: floor_id.into(),
            position,
            neighbors: SmallVec::new(),
            poi_id: None,
            kind,
        }
    }

    pub fn with_neighbors(
        mut self,
        neighbors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_poi(mut self, poi_id: impl Into<String>) -> Self {
        self.poi_id = Some(poi_id.into());
        self
    }
}
