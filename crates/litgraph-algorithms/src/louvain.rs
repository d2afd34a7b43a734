//! Louvain modularity optimisation
//!
//! Multi-level greedy algorithm (Blondel et al. 2008):
//!
//! 1. **Local moving**: every node starts alone; nodes are visited in index
//!    order and moved to the neighboring community with the largest positive
//!    modularity gain, sweeping until a full pass makes no move.
//! 2. **Aggregation**: communities are contracted into super-nodes, internal
//!    edges become self-loops, and phase 1 repeats on the contracted graph.
//!
//! Visiting order is fixed, so results are deterministic for a given view.
//! Louvain does not guarantee connected communities; see [`crate::leiden`].

use crate::common::{renumber, CommunityResult, GraphView};
use crate::weighted::{compact, WeightedGraph, GAIN_EPSILON};
use tracing::debug;

/// Louvain configuration
#[derive(Debug, Clone)]
pub struct LouvainConfig {
    /// Resolution parameter (gamma). Higher values give smaller communities.
    pub resolution: f64,
    /// Maximum local-moving sweeps per level
    pub max_iterations: usize,
    /// Maximum aggregation levels
    pub max_levels: usize,
    /// Minimum modularity improvement for another level
    pub min_modularity_gain: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
        }
    }
}

/// Run Louvain over the view.
///
/// Always returns a partition covering every node. `converged` is false if a
/// sweep or level cap was hit while moves were still improving modularity.
pub fn louvain(view: &GraphView, config: &LouvainConfig) -> CommunityResult {
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

    // original node -> node of the current (aggregated) graph
    let mut membership: Vec<usize> = (0..n).collect();
    let singletons: Vec<usize> = (0..n).collect();
    let mut prev_modularity = graph.modularity(&singletons, config.resolution);
    let mut levels = 0;
    let mut converged = false;
    let mut every_sweep_settled = true;

    for level in 0..config.max_levels {
        levels = level + 1;
        let outcome = local_moving(&graph, config.resolution, config.max_iterations);
        every_sweep_settled &= outcome.settled;
        if !outcome.moved {
            converged = true;
            break;
        }

        let (assignment, k) = compact(&outcome.assignment);
        for m in membership.iter_mut() {
            *m = assignment[*m];
        }

        let modularity = graph.modularity(&assignment, config.resolution);
        debug!(level, communities = k, modularity, "louvain level complete");
        if modularity - prev_modularity < config.min_modularity_gain {
            converged = true;
            break;
        }
        prev_modularity = modularity;
        graph = graph.aggregate(&assignment, k);
    }

    CommunityResult {
        assignment: renumber(&membership),
        iterations: levels,
        converged: converged && every_sweep_settled,
    }
}

pub(crate) struct LocalMoves {
    pub assignment: Vec<usize>,
    pub moved: bool,
    pub settled: bool,
}

/// Phase 1: sweep nodes in order, moving each to its best neighboring community.
pub(crate) fn local_moving(graph: &WeightedGraph, resolution: f64, max_sweeps: usize) -> LocalMoves {
    let n = graph.n;
    let mut assignment: Vec<usize> = (0..n).collect();
    let mut community_degree = graph.degrees.clone();
    let mut moved = false;
    let mut settled = false;

    for _sweep in 0..max_sweeps {
        let mut improved = false;

        for node in 0..n {
            let current = assignment[node];
            let ki = graph.degrees[node];
            community_degree[current] -= ki;

            let weights = graph.community_weights(node, &assignment, |_| true);
            let ki_current = weights
                .iter()
                .find(|&&(c, _)| c == current)
                .map_or(0.0, |&(_, w)| w);

            let mut best = current;
            let mut best_gain = graph.gain(ki_current, community_degree[current], ki, resolution);
            for &(comm, ki_in) in &weights {
                let gain = graph.gain(ki_in, community_degree[comm], ki, resolution);
                if gain > best_gain + GAIN_EPSILON {
                    best = comm;
                    best_gain = gain;
                }
            }

            community_degree[best] += ki;
            if best != current {
                assignment[node] = best;
                improved = true;
                moved = true;
            }
        }

        if !improved {
            settled = true;
            break;
        }
    }

    LocalMoves {
        assignment,
        moved,
        settled,
    }
}
