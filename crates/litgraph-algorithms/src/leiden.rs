//! Leiden community detection
//!
//! Improves on Louvain with a guarantee that every community induces a
//! connected subgraph (Traag, Waltman, van Eck 2019).
//!
//! Each level runs three phases:
//!
//! 1. **Local moving**: queue-driven greedy moves; when a node changes
//!    community only its neighbors outside the new community are revisited.
//! 2. **Refinement**: inside every community, nodes restart as singletons and
//!    a singleton may only merge into a sub-community it has an edge to, so
//!    each refined sub-community is connected.
//! 3. **Aggregation**: the *refined* sub-communities are contracted, and the
//!    contracted nodes start from the unrefined community they came from.
//!
//! Levels repeat until refinement can no longer merge anything. A final
//! pass splits any community that is not connected in the input graph.

use crate::common::{renumber, CommunityResult, GraphView};
use crate::weighted::{compact, split_disconnected, WeightedGraph, GAIN_EPSILON};
use std::collections::VecDeque;
use tracing::debug;

/// Leiden configuration
#[derive(Debug, Clone)]
pub struct LeidenConfig {
    /// Resolution parameter (gamma). Higher values give smaller communities.
    pub resolution: f64,
    /// Local-moving budget per level, in multiples of the node count
    pub max_iterations: usize,
    /// Maximum aggregation levels
    pub max_levels: usize,
}

impl Default for LeidenConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: 100,
            max_levels: 10,
        }
    }
}

/// Run Leiden over the view.
pub fn leiden(view: &GraphView, config: &LeidenConfig) -> CommunityResult {
    let n = view.node_count;
    if n == 0 {
        return CommunityResult::empty();
    }

    let mut graph = WeightedGraph::from_view(view);
    if graph.total_weight == 0.0 {
        return CommunityResult {
            assignment: (0..n).collect(),
            iterations: 0,
            converged: true,
        };
    }

    let mut membership: Vec<usize> = (0..n).collect();
    let mut partition: Vec<usize> = (0..n).collect();
    let mut levels = 0;
    let mut converged = false;
    let mut every_phase_settled = true;

    for level in 0..config.max_levels {
        levels = level + 1;
        every_phase_settled &= move_nodes(&graph, &mut partition, config);

        let (communities, k) = compact(&partition);
        if k == graph.n {
            partition = communities;
            converged = true;
            break;
        }

        let (refined, r) = compact(&refine(&graph, &communities, config.resolution));
        debug!(level, communities = k, refined = r, "leiden level complete");
        if r == graph.n {
            partition = communities;
            converged = true;
            break;
        }

        // contracted nodes start in the unrefined community of their members
        let mut next_partition = vec![0; r];
        for node in 0..graph.n {
            next_partition[refined[node]] = communities[node];
        }
        for m in membership.iter_mut() {
            *m = refined[*m];
        }
        graph = graph.aggregate(&refined, r);
        partition = next_partition;
    }

    let mut assignment: Vec<usize> = membership.iter().map(|&node| partition[node]).collect();
    split_disconnected(view, &mut assignment);

    CommunityResult {
        assignment: renumber(&assignment),
        iterations: levels,
        converged: converged && every_phase_settled,
    }
}

/// Phase 1: queue-based local moving. Returns false if the budget ran out
/// before the queue drained.
fn move_nodes(graph: &WeightedGraph, partition: &mut [usize], config: &LeidenConfig) -> bool {
    let n = graph.n;
    let mut community_degree = vec![0.0; n];
    for node in 0..n {
        community_degree[partition[node]] += graph.degrees[node];
    }

    let mut queue: VecDeque<usize> = (0..n).collect();
    let mut in_queue = vec![true; n];
    let mut budget = config.max_iterations.saturating_mul(n);

    while let Some(node) = queue.pop_front() {
        if budget == 0 {
            return false;
        }
        budget -= 1;
        in_queue[node] = false;

        let current = partition[node];
        let ki = graph.degrees[node];
        community_degree[current] -= ki;

        let weights = graph.community_weights(node, partition, |_| true);
        let ki_current = weights
            .iter()
            .find(|&&(c, _)| c == current)
            .map_or(0.0, |&(_, w)| w);

        let mut best = current;
        let mut best_gain = graph.gain(ki_current, community_degree[current], ki, config.resolution);
        for &(comm, ki_in) in &weights {
            let gain = graph.gain(ki_in, community_degree[comm], ki, config.resolution);
            if gain > best_gain + GAIN_EPSILON {
                best = comm;
                best_gain = gain;
            }
        }

        community_degree[best] += ki;
        if best != current {
            partition[node] = best;
            for &(neighbor, _) in &graph.adj[node] {
                if !in_queue[neighbor] && partition[neighbor] != best {
                    queue.push_back(neighbor);
                    in_queue[neighbor] = true;
                }
            }
        }
    }

    true
}

/// Phase 2: refine each community into connected sub-communities.
///
/// Sub-community labels are node indices. Only nodes still alone may move,
/// and only into a sub-community of the same community they share an edge
/// with, so no sub-community ever loses connectivity.
fn refine(graph: &WeightedGraph, communities: &[usize], resolution: f64) -> Vec<usize> {
    let n = graph.n;
    let mut refined: Vec<usize> = (0..n).collect();
    let mut refined_degree = graph.degrees.clone();
    let mut alone = vec![true; n];

    for node in 0..n {
        if !alone[node] {
            continue;
        }
        let own = refined[node];
        let ki = graph.degrees[node];
        let community = communities[node];

        let weights = graph.community_weights(node, &refined, |neighbor| communities[neighbor] == community);

        let mut best = None;
        let mut best_gain = 0.0;
        for &(sub, ki_in) in &weights {
            if sub == own {
                continue;
            }
            let gain = graph.gain(ki_in, refined_degree[sub], ki, resolution);
            if gain > best_gain + GAIN_EPSILON {
                best = Some(sub);
                best_gain = gain;
            }
        }

        if let Some(sub) = best {
            refined[node] = sub;
            refined_degree[own] -= ki;
            refined_degree[sub] += ki;
            alone[node] = false;
            // a non-empty sub-community always still holds its founding node
            alone[sub] = false;
        }
    }

    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_connected(view: &GraphView, assignment: &[usize]) {
        let communities: HashSet<usize> = assignment.iter().copied().collect();
        for comm in communities {
            let members: Vec<usize> = (0..view.node_count).filter(|&i| assignment[i] == comm).collect();
            let mut seen = vec![false; view.node_count];
            let mut stack = vec![members[0]];
            seen[members[0]] = true;
            let mut reached = 0;
            while let Some(node) = stack.pop() {
                reached += 1;
                for &nb in view.neighbors(node) {
                    if !seen[nb] && assignment[nb] == comm {
                        seen[nb] = true;
                        stack.push(nb);
                    }
                }
            }
            assert_eq!(reached, members.len(), "community {} is not connected", comm);
        }
    }

    #[test]
    fn test_leiden_triangle() {
        let view = GraphView::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let result = leiden(&view, &LeidenConfig::default());
        assert_eq!(result.assignment, vec![0, 0, 0]);
        assert!(result.converged);
    }

    #[test]
    fn test_leiden_two_cliques() {
        let view = GraphView::from_edges(
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        );
        let c = leiden(&view, &LeidenConfig::default()).assignment;

        assert_eq!(c[0], c[1]);
        assert_eq!(c[1], c[2]);
        assert_eq!(c[3], c[4]);
        assert_eq!(c[4], c[5]);
        assert_ne!(c[0], c[3]);
    }

    #[test]
    fn test_leiden_disconnected_components_stay_apart() {
        // A--B--C   D--E
        let view = GraphView::from_edges(5, &[(0, 1), (1, 2), (3, 4)]);
        let c = leiden(&view, &LeidenConfig::default()).assignment;

        assert_eq!(c[0], c[1]);
        assert_eq!(c[1], c[2]);
        assert_eq!(c[3], c[4]);
        assert_ne!(c[0], c[3]);
    }

    #[test]
    fn test_leiden_connectivity_guarantee() {
        let mut edges: Vec<(usize, usize)> = (0..15).map(|i| (i, i + 1)).collect();
        edges.push((0, 5));
        edges.push((10, 15));
        edges.push((17, 18));
        let view = GraphView::from_edges(20, &edges);

        let result = leiden(&view, &LeidenConfig::default());
        assert_eq!(result.assignment.len(), 20);
        assert_connected(&view, &result.assignment);
    }

    #[test]
    fn test_leiden_isolated_node_is_singleton() {
        let view = GraphView::from_edges(4, &[(0, 1), (1, 2), (0, 2)]);
        let c = leiden(&view, &LeidenConfig::default()).assignment;
        assert_eq!(c[0], c[1]);
        assert_ne!(c[3], c[0]);
    }

    #[test]
    fn test_leiden_level_cap_reports_non_convergence() {
        let view = GraphView::from_edges(
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        );
        let config = LeidenConfig {
            max_levels: 0,
            ..LeidenConfig::default()
        };
        let result = leiden(&view, &config);

        assert_eq!(result.assignment.len(), 6);
        assert!(!result.converged);
    }
}
