//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use rustc_hash::FxHashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Community identifier assigned by a detection algorithm.
pub type CommunityId = usize;

/// A dense, integer-indexed view of an undirected, unweighted simple graph
/// using Compressed Sparse Row (CSR) format.
///
/// Every edge `{u, v}` is stored twice, once in each endpoint's neighbor slice.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: FxHashMap<NodeId, usize>,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Neighbors of a node (by index)
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Build a view from per-node adjacency lists.
    ///
    /// The lists must already be symmetric (`v` in `adjacency[u]` iff `u` in
    /// `adjacency[v]`) and free of self-loops and duplicates.
    pub fn from_adjacency_list(index_to_node: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let mut node_to_index = FxHashMap::default();
        for (idx, &id) in index_to_node.iter().enumerate() {
            node_to_index.insert(id, idx);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for neighbors in adjacency.into_iter().take(node_count) {
            targets.extend(neighbors);
            offsets.push(targets.len());
        }
        while offsets.len() < node_count + 1 {
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Build a view over nodes `0..node_count` from an undirected edge list.
    ///
    /// Self-loops and repeated pairs are dropped. Node ids equal their index.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for &(u, v) in edges {
            if u == v || u >= node_count || v >= node_count || adjacency[u].contains(&v) {
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        let ids = (0..node_count as NodeId).collect();
        Self::from_adjacency_list(ids, adjacency)
    }
}

/// Renumber community labels to `0..k` in order of first appearance.
pub fn renumber(assignment: &[usize]) -> Vec<CommunityId> {
    let mut mapping: FxHashMap<usize, CommunityId> = FxHashMap::default();
    assignment
        .iter()
        .map(|&c| {
            let next = mapping.len();
            *mapping.entry(c).or_insert(next)
        })
        .collect()
}

/// Outcome shared by all community detection algorithms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityResult {
    /// Community of each node, indexed like the view. Ids are consecutive from 0.
    pub assignment: Vec<CommunityId>,
    /// Outer iterations performed (aggregation levels or propagation rounds)
    pub iterations: usize,
    /// False when an iteration cap stopped the algorithm before it settled
    pub converged: bool,
}

impl CommunityResult {
    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        self.assignment.iter().max().map_or(0, |&c| c + 1)
    }

    pub(crate) fn empty() -> Self {
        CommunityResult {
            assignment: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }
}
