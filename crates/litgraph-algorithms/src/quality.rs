//! Partition quality metrics
//!
//! All metrics treat the view as an unweighted, undirected simple graph and
//! accept any community labels (they need not be consecutive).

use crate::common::{renumber, GraphView};

/// Quality of one partition
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionQuality {
    /// Newman-Girvan modularity; `None` when the graph has no edges
    pub modularity: Option<f64>,
    /// Mean internal density over communities with more than one member
    pub internal_edge_density: f64,
    /// Mean conductance over communities that touch at least one edge
    pub conductance: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct CommunityStats {
    size: usize,
    internal_edges: usize,
    boundary_edges: usize,
    degree_sum: usize,
}

fn community_stats(view: &GraphView, assignment: &[usize]) -> Vec<CommunityStats> {
    debug_assert_eq!(assignment.len(), view.node_count);
    let dense = renumber(assignment);
    let k = dense.iter().max().map_or(0, |&c| c + 1);
    let mut stats = vec![CommunityStats::default(); k];

    for u in 0..view.node_count {
        let cu = dense[u];
        stats[cu].size += 1;
        stats[cu].degree_sum += view.degree(u);
        for &v in view.neighbors(u) {
            if dense[v] == cu {
                if u < v {
                    stats[cu].internal_edges += 1;
                }
            } else {
                stats[cu].boundary_edges += 1;
            }
        }
    }
    stats
}

/// Modularity Q = (1/2m) sum_ij (A_ij - k_i k_j / 2m) delta(c_i, c_j)
pub fn modularity(view: &GraphView, assignment: &[usize]) -> Option<f64> {
    modularity_from_stats(view, &community_stats(view, assignment))
}

fn modularity_from_stats(view: &GraphView, stats: &[CommunityStats]) -> Option<f64> {
    let m = view.edge_count() as f64;
    if m == 0.0 {
        return None;
    }
    Some(
        stats
            .iter()
            .map(|s| s.internal_edges as f64 / m - (s.degree_sum as f64 / (2.0 * m)).powi(2))
            .sum(),
    )
}

/// Mean of `internal_edges / (size * (size - 1) / 2)` over communities of size > 1.
/// Returns 0 if no community qualifies.
pub fn internal_edge_density(view: &GraphView, assignment: &[usize]) -> f64 {
    density_from_stats(&community_stats(view, assignment))
}

fn density_from_stats(stats: &[CommunityStats]) -> f64 {
    let densities: Vec<f64> = stats
        .iter()
        .filter(|s| s.size > 1)
        .map(|s| {
            let possible = (s.size * (s.size - 1)) as f64 / 2.0;
            s.internal_edges as f64 / possible
        })
        .collect();
    mean(&densities)
}

/// Mean of `boundary / (2 * internal + boundary)` over communities with at
/// least one internal or boundary edge. Returns 0 if none qualify.
pub fn conductance(view: &GraphView, assignment: &[usize]) -> f64 {
    conductance_from_stats(&community_stats(view, assignment))
}

fn conductance_from_stats(stats: &[CommunityStats]) -> f64 {
    let values: Vec<f64> = stats
        .iter()
        .filter(|s| s.internal_edges + s.boundary_edges > 0)
        .map(|s| s.boundary_edges as f64 / (2 * s.internal_edges + s.boundary_edges) as f64)
        .collect();
    mean(&values)
}

/// Compute all three metrics in one pass over the edges.
pub fn partition_quality(view: &GraphView, assignment: &[usize]) -> PartitionQuality {
    let stats = community_stats(view, assignment);
    PartitionQuality {
        modularity: modularity_from_stats(view, &stats),
        internal_edge_density: density_from_stats(&stats),
        conductance: conductance_from_stats(&stats),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
