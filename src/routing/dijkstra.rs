//! Shortest paths over the explicit edge-weighted floor graph.
//!
//! The query endpoints are free-form coordinates: both are snapped to their
//! nearest graph nodes for the search, but the returned path always begins
//! and ends with the literal query coordinates so the rendered route stays
//! anchored to the user's real position.

use std::collections::BinaryHeap;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::geo::Point;
use crate::model::{GraphEdge, GraphNode};
use crate::routing::{Frontier, snap_nearest};
use crate::{Error, Result};

const UNVISITED: usize = usize::MAX;

/// Compute the shortest walking path between two free-form coordinates.
///
/// Edges are treated as undirected regardless of their stored from/to
/// order; edges referencing unknown node ids are skipped. Fails with
/// [`Error::NotFound`] when the node or edge set is empty, or when the
/// snapped endpoints lie in different connected components.
pub fn shortest_path(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    from: Point,
    to: Point,
) -> Result<Vec<Point>> {
    if nodes.is_empty() {
        return Err(Error::NotFound("no graph nodes for this building/floor".into()));
    }
    if edges.is_empty() {
        return Err(Error::NotFound("no graph edges for this building/floor".into()));
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.node_id.as_str(), i))
        .collect();

    let start = snap_nearest(nodes, from, |n| n.position, |n| n.node_id.as_str())
        .expect("node set is non-empty");
    let goal = snap_nearest(nodes, to, |n| n.position, |n| n.node_id.as_str())
        .expect("node set is non-empty");
    let start_idx = index[start.node_id.as_str()];
    let goal_idx = index[goal.node_id.as_str()];

    // Undirected adjacency: both directions of every edge.
    let mut adjacency: Vec<SmallVec<[(usize, f64); 4]>> = vec![SmallVec::new(); nodes.len()];
    for edge in edges {
        let (Some(&a), Some(&b)) = (
            index.get(edge.from_node.as_str()),
            index.get(edge.to_node.as_str()),
        ) else {
            debug!(edge = %edge.edge_id, "edge references an unknown node, skipped");
            continue;
        };
        adjacency[a].push((b, edge.weight));
        adjacency[b].push((a, edge.weight));
    }

    let mut dist = vec![f64::INFINITY; nodes.len()];
    let mut prev = vec![UNVISITED; nodes.len()];
    let mut frontier = BinaryHeap::new();

    dist[start_idx] = 0.0;
    frontier.push(Frontier { cost: 0.0, node: start_idx });

    while let Some(Frontier { cost, node }) = frontier.pop() {
        // Stale entry: a shorter path to this node was already settled.
        if cost > dist[node] {
            continue;
        }
        if node == goal_idx {
            break;
        }
        for &(next, weight) in &adjacency[node] {
            let alt = cost + weight;
            if alt < dist[next] {
                dist[next] = alt;
                prev[next] = node;
                frontier.push(Frontier { cost: alt, node: next });
            }
        }
    }

    if prev[goal_idx] == UNVISITED && start_idx != goal_idx {
        return Err(Error::NotFound("no path between the snapped endpoints".into()));
    }

    // Walk predecessors back from the goal, then reverse.
    let mut chain = vec![goal_idx];
    let mut current = goal_idx;
    while prev[current] != UNVISITED {
        current = prev[current];
        chain.push(current);
    }
    chain.reverse();

    let mut path = Vec::with_capacity(chain.len() + 2);
    path.push(from);
    path.extend(chain.into_iter().map(|i| nodes[i].position));
    path.push(to);
    Ok(path)
}
