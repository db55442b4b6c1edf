//! Property tests for the numeric laws the engines rely on.

use proptest::prelude::*;

use wayfinder_rs::geo::{Point, segment_distance};
use wayfinder_rs::model::{GraphEdge, GraphNode, NavNode, NavNodeKind};
use wayfinder_rs::positioning::rssi::{signal_weight, trilaterate, weighted_centroid};
use wayfinder_rs::routing::{astar, dijkstra};

/// Exhaustive minimum cost over all simple paths in the complete Euclidean
/// graph on `points`.
fn brute_force_min_cost(points: &[Point], from: usize, to: usize) -> f64 {
    fn dfs(
        points: &[Point],
        current: usize,
        to: usize,
        visited: &mut [bool],
        cost: f64,
        best: &mut f64,
    ) {
        if cost >= *best {
            return;
        }
        if current == to {
            *best = cost;
            return;
        }
        for next in 0..points.len() {
            if !visited[next] {
                visited[next] = true;
                dfs(points, next, to, visited, cost + points[current].distance(points[next]), best);
                visited[next] = false;
            }
        }
    }

    let mut best = f64::INFINITY;
    let mut visited = vec![false; points.len()];
    visited[from] = true;
    dfs(points, from, to, &mut visited, 0.0, &mut best);
    best
}

/// Distinct integer-grid points, so snapping is unambiguous.
fn distinct_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::hash_set((0..60i32, 0..60i32), 2..6).prop_map(|set| {
        set.into_iter()
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect()
    })
}

proptest! {
    #[test]
    fn trilateration_recovers_any_interior_point(
        x in 0.0f64..100.0,
        y in 0.0f64..100.0,
    ) {
        let truth = Point::new(x, y);
        let refs = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 100.0),
        ];
        let solved = trilaterate(refs.map(|r| (r, r.distance(truth)))).unwrap();
        prop_assert!(solved.distance(truth) < 1e-3);
    }

    #[test]
    fn weighted_centroid_stays_in_bounding_box(
        samples in prop::collection::vec(
            ((0.0f64..100.0, 0.0f64..100.0), -100i32..=-30),
            1..6,
        ),
    ) {
        let samples: Vec<(Point, i32)> = samples
            .into_iter()
            .map(|((x, y), rssi)| (Point::new(x, y), rssi))
            .collect();
        let centroid = weighted_centroid(&samples);

        let min_x = samples.iter().map(|(p, _)| p.x).fold(f64::INFINITY, f64::min);
        let max_x = samples.iter().map(|(p, _)| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = samples.iter().map(|(p, _)| p.y).fold(f64::INFINITY, f64::min);
        let max_y = samples.iter().map(|(p, _)| p.y).fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(centroid.x >= min_x - 1e-9 && centroid.x <= max_x + 1e-9);
        prop_assert!(centroid.y >= min_y - 1e-9 && centroid.y <= max_y + 1e-9);
    }

    #[test]
    fn stronger_signal_never_weighs_less(a in -100i32..0, b in -100i32..0) {
        let (weak, strong) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(signal_weight(strong) >= signal_weight(weak));
    }

    #[test]
    fn segment_distance_never_exceeds_endpoint_distance(
        px in -50.0f64..50.0, py in -50.0f64..50.0,
        ax in -50.0f64..50.0, ay in -50.0f64..50.0,
        bx in -50.0f64..50.0, by in -50.0f64..50.0,
    ) {
        let p = Point::new(px, py);
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let d = segment_distance(p, a, b);
        prop_assert!(d <= p.distance(a) + 1e-9);
        prop_assert!(d <= p.distance(b) + 1e-9);
    }

    /// Dijkstra optimality: on a complete Euclidean graph, the returned
    /// path weight equals the exhaustive minimum.
    #[test]
    fn dijkstra_matches_brute_force(points in distinct_points()) {
        let nodes: Vec<GraphNode> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| GraphNode::new(format!("n{i:02}"), "B1", "F1", p))
            .collect();
        let mut edges = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                edges.push(GraphEdge::new(
                    format!("e{i:02}-{j:02}"),
                    format!("n{i:02}"),
                    format!("n{j:02}"),
                    "B1",
                    "F1",
                    points[i].distance(points[j]),
                ));
            }
        }

        let from = points[0];
        let to = points[points.len() - 1];
        let path = dijkstra::shortest_path(&nodes, &edges, from, to).unwrap();

        // Interior points are the node chain; the literal endpoints
        // coincide with the snapped nodes here.
        let cost: f64 = path[1..path.len() - 1]
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum();
        let best = brute_force_min_cost(&points, 0, points.len() - 1);
        prop_assert!((cost - best).abs() < 1e-6);
    }

    /// A* optimality under the admissible Euclidean heuristic: same
    /// exhaustive minimum on the adjacency-embedded representation.
    #[test]
    fn astar_matches_brute_force(points in distinct_points()) {
        let ids: Vec<String> = (0..points.len()).map(|i| format!("n{i:02}")).collect();
        let nodes: Vec<NavNode> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let neighbors: Vec<&str> = ids
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, id)| id.as_str())
                    .collect();
                NavNode::new(&ids[i], "F1", p, NavNodeKind::Waypoint).with_neighbors(neighbors)
            })
            .collect();

        let start = points[0];
        let dest = points[points.len() - 1];
        let plan = astar::plan_route(&nodes, start, dest);

        prop_assert_eq!(plan.message.as_str(), "Route calculated successfully");
        // The literal start/end segments have zero length here, so the
        // plan total is exactly the node-to-node weight sum.
        let best = brute_force_min_cost(&points, 0, points.len() - 1);
        prop_assert!((plan.total_distance - best).abs() < 1e-6);
    }
}
