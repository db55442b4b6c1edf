//! # Routing Engines
//!
//! Two independent representations of the navigable floor and the
//! algorithms over them:
//!
//! - `dijkstra` — shortest paths over the explicit edge-weighted graph
//! - `astar` — waypoint routes over on-node adjacency, with direct-line
//!   fallbacks
//! - `deviation` — decides whether to truncate or replan an in-progress
//!   route
//!
//! All accumulator state (distance maps, frontiers, closed sets) is local
//! to a single call.

pub mod astar;
pub mod deviation;
pub mod dijkstra;

use std::cmp::Ordering;

use crate::geo::Point;

/// Snap a query coordinate to the nearest item.
///
/// Equal distances resolve to the lexicographically lower id, so snapping
/// does not depend on input order.
pub(crate) fn snap_nearest<'a, T>(
    items: &'a [T],
    target: Point,
    position: impl Fn(&T) -> Point,
    id: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let dist = position(item).distance(target);
        let closer = match best {
            None => true,
            Some((current, best_dist)) => {
                dist < best_dist || (dist == best_dist && id(item) < id(current))
            }
        };
        if closer {
            best = Some((item, dist));
        }
    }
    best.map(|(item, _)| item)
}

/// Min-heap entry for the search frontiers.
///
/// Ordered by smallest cost first; ties fall back to the node index so
/// popping order is deterministic.
pub(crate) struct Frontier {
    pub cost: f64,
    pub node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}
