//! Graph algorithms module
//!
//! Algorithms live in the `litgraph-algorithms` crate and run over a dense
//! CSR `GraphView`. This module is the adapter layer: it projects a
//! [`PaperGraph`] into a view, dispatches detection, and maps results back
//! to node labels.

pub mod detect;
pub mod partition;
pub mod quality;
pub mod statistics;

use crate::graph::PaperGraph;
use litgraph_algorithms::{GraphView, NodeId as AlgoNodeId};

pub use detect::{detect, detect_all, CommunityAlgorithm, Detection, DetectionStatus, ParseAlgorithmError};
pub use partition::Partition;
pub use quality::{evaluate, PartitionError, PartitionResult, QualityReport};
pub use statistics::{degree_centrality, graph_statistics, most_connected, ConnectedNode, GraphStatistics};

// Re-export algorithm primitives
pub use litgraph_algorithms::{
    leiden, louvain, slpa, weakly_connected_components, CommunityId, CommunityResult,
    LeidenConfig, LouvainConfig, SlpaConfig, SlpaResult, WccResult,
};

/// Build a GraphView from the graph for algorithm execution.
///
/// View index `i` is the node with id `i`, so results can be zipped with
/// `graph.nodes()`.
pub fn build_view(graph: &PaperGraph) -> GraphView {
    let index_to_node: Vec<AlgoNodeId> = graph.nodes().map(|n| n.id.as_u64()).collect();

    let adjacency: Vec<Vec<usize>> = graph
        .nodes()
        .map(|n| {
            graph
                .neighbor_ids(n.id)
                .map(|neighbor| neighbor.as_u64() as usize)
                .collect()
        })
        .collect();

    GraphView::from_adjacency_list(index_to_node, adjacency)
}
