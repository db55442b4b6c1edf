//! Waypoint routing over the adjacency-embedded floor graph.
//!
//! Runs A* with a Euclidean heuristic. Edge costs are also Euclidean
//! distances, so the heuristic never overestimates and the discovered node
//! path is optimal. When the floor has no waypoint graph, or the graph
//! does not connect the snapped endpoints, the route degrades to a direct
//! two-point line instead of failing.

use std::collections::BinaryHeap;

use hashbrown::HashMap;
use tracing::debug;

use crate::geo::Point;
use crate::model::{NavNode, RoutePlan, RoutePoint};
use crate::routing::{Frontier, snap_nearest};

const NO_PARENT: usize = usize::MAX;

/// Plan a route from `start` to `dest` across a floor's waypoint graph.
///
/// The returned plan always begins with the literal start and ends with
/// the literal destination; graph nodes along the way are tagged as
/// waypoints. This function never fails: a missing or disconnected graph
/// produces a direct route with an explanatory message.
pub fn plan_route(nodes: &[NavNode], start: Point, dest: Point) -> RoutePlan {
    if nodes.is_empty() {
        debug!("floor has no waypoint graph, using direct route");
        return direct_route(start, dest, "Direct path (no navigation graph)");
    }

    let Some(node_path) = node_path(nodes, start, dest) else {
        debug!("waypoint graph does not connect the endpoints, using direct route");
        return direct_route(start, dest, "Direct path (no valid route through nodes)");
    };

    let mut route = Vec::with_capacity(node_path.len() + 2);
    route.push(RoutePoint::start(start));
    route.extend(node_path.into_iter().map(RoutePoint::waypoint));
    route.push(RoutePoint::destination(dest));

    RoutePlan::from_points("Route calculated successfully", route)
}

fn direct_route(start: Point, dest: Point, message: &str) -> RoutePlan {
    RoutePlan::from_points(
        message,
        vec![RoutePoint::start(start), RoutePoint::destination(dest)],
    )
}

/// A* over the on-node adjacency lists.
///
/// Returns the coordinates of the snapped node path, or `None` when the
/// frontier drains without reaching the destination node. A popped node is
/// final and never re-expanded; neighbor ids that do not resolve on this
/// floor are skipped.
fn node_path(nodes: &[NavNode], start: Point, dest: Point) -> Option<Vec<Point>> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.node_id.as_str(), i))
        .collect();

    let start_idx = index[snap_nearest(nodes, start, |n| n.position, |n| n.node_id.as_str())?
        .node_id
        .as_str()];
    let goal_idx = index[snap_nearest(nodes, dest, |n| n.position, |n| n.node_id.as_str())?
        .node_id
        .as_str()];
    let goal_pos = nodes[goal_idx].position;

    let mut g = vec![f64::INFINITY; nodes.len()];
    let mut parent = vec![NO_PARENT; nodes.len()];
    let mut closed = vec![false; nodes.len()];
    let mut frontier = BinaryHeap::new();

    g[start_idx] = 0.0;
    frontier.push(Frontier {
        cost: nodes[start_idx].position.distance(goal_pos),
        node: start_idx,
    });

    while let Some(Frontier { node, .. }) = frontier.pop() {
        if node == goal_idx {
            let mut chain = vec![node];
            let mut current = node;
            while parent[current] != NO_PARENT {
                current = parent[current];
                chain.push(current);
            }
            chain.reverse();
            return Some(chain.into_iter().map(|i| nodes[i].position).collect());
        }
        if closed[node] {
            continue;
        }
        closed[node] = true;

        for neighbor_id in &nodes[node].neighbors {
            // Dangling reference: treated as absent.
            let Some(&next) = index.get(neighbor_id.as_str()) else {
                continue;
            };
            if closed[next] {
                continue;
            }
            let tentative = g[node] + nodes[node].position.distance(nodes[next].position);
            if tentative < g[next] {
                g[next] = tentative;
                parent[next] = node;
                frontier.push(Frontier {
                    cost: tentative + nodes[next].position.distance(goal_pos),
                    node: next,
                });
            }
        }
    }

    None
}
