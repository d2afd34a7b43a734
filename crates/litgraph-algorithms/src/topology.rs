//! Whole-graph topology measures

use super::common::GraphView;
use std::collections::{BTreeMap, VecDeque};

/// Shortest path summary over every ordered pair of distinct nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLengths {
    /// Mean hop count, `None` when the graph is empty or disconnected
    pub average: Option<f64>,
    /// Longest shortest path, `None` when the graph is empty or disconnected
    pub diameter: Option<usize>,
}

/// Degree centrality: `degree / (n - 1)` for each node, 0 when n <= 1.
pub fn degree_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    if n <= 1 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|i| view.degree(i) as f64 * scale).collect()
}

/// Edge density of a simple undirected graph: `2m / (n (n - 1))`.
pub fn density(view: &GraphView) -> f64 {
    let n = view.node_count;
    if n < 2 {
        return 0.0;
    }
    2.0 * view.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Breadth-first hop distances from `source` (by index).
///
/// Unreachable nodes are `None`.
pub fn bfs_distances(view: &GraphView, source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; view.node_count];
    if source >= view.node_count {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[current].map_or(0, |d| d + 1);
        for &next in view.neighbors(current) {
            if distances[next].is_none() {
                distances[next] = Some(next_distance);
                queue.push_back(next);
            }
        }
    }

    distances
}

/// Average shortest path length and diameter, one BFS per node.
///
/// A single node has average 0 and diameter 0.
pub fn path_lengths(view: &GraphView) -> PathLengths {
    let n = view.node_count;
    let disconnected = PathLengths {
        average: None,
        diameter: None,
    };
    if n == 0 {
        return disconnected;
    }

    let mut total = 0usize;
    let mut diameter = 0usize;
    for source in 0..n {
        for distance in bfs_distances(view, source) {
            match distance {
                Some(d) => {
                    total += d;
                    diameter = diameter.max(d);
                }
                None => return disconnected,
            }
        }
    }

    let pairs = n * (n - 1);
    PathLengths {
        average: Some(if pairs == 0 { 0.0 } else { total as f64 / pairs as f64 }),
        diameter: Some(diameter),
    }
}

/// Number of nodes per degree, ascending by degree.
pub fn degree_distribution(view: &GraphView) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for i in 0..view.node_count {
        *distribution.entry(view.degree(i)).or_insert(0) += 1;
    }
    distribution
}
