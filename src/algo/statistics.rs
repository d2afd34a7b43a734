//! Whole-graph statistics and node centrality

use super::build_view;
use crate::graph::{NodeKind, PaperGraph};
use indexmap::IndexMap;
use litgraph_algorithms::{degree_distribution, density, path_lengths, weakly_connected_components};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics of a paper graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub paper_count: usize,
    pub author_count: usize,
    pub keyword_count: usize,
    /// `2m / (n (n - 1))`, 0 for fewer than two nodes
    pub density: f64,
    pub average_degree: f64,
    pub component_count: usize,
    /// Mean shortest path length, `None` unless the graph is connected
    pub average_path_length: Option<f64>,
    /// Longest shortest path, `None` unless the graph is connected
    pub diameter: Option<usize>,
    /// Degree -> number of nodes with that degree
    pub degree_distribution: BTreeMap<usize, usize>,
}

/// A node ranked by degree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedNode {
    pub label: String,
    pub kind: NodeKind,
    pub degree: usize,
}

pub fn graph_statistics(graph: &PaperGraph) -> GraphStatistics {
    let view = build_view(graph);
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let paths = path_lengths(&view);

    let mut counts = [0usize; 3];
    for node in graph.nodes() {
        let slot = match node.kind() {
            NodeKind::Paper => 0,
            NodeKind::Author => 1,
            NodeKind::Keyword => 2,
        };
        counts[slot] += 1;
    }

    GraphStatistics {
        node_count,
        edge_count,
        paper_count: counts[0],
        author_count: counts[1],
        keyword_count: counts[2],
        density: density(&view),
        average_degree: if node_count == 0 {
            0.0
        } else {
            2.0 * edge_count as f64 / node_count as f64
        },
        component_count: weakly_connected_components(&view).component_count(),
        average_path_length: paths.average,
        diameter: paths.diameter,
        degree_distribution: degree_distribution(&view),
    }
}

/// The `k` highest-degree nodes, ties kept in graph order
pub fn most_connected(graph: &PaperGraph, k: usize) -> Vec<ConnectedNode> {
    let mut ranked: Vec<ConnectedNode> = graph
        .nodes()
        .map(|node| ConnectedNode {
            label: node.label.clone(),
            kind: node.kind(),
            degree: graph.neighbor_ids(node.id).count(),
        })
        .collect();
    ranked.sort_by(|a, b| b.degree.cmp(&a.degree));
    ranked.truncate(k);
    ranked
}

/// `degree / (n - 1)` per node label, in graph order
pub fn degree_centrality(graph: &PaperGraph) -> IndexMap<String, f64> {
    let view = build_view(graph);
    graph
        .nodes()
        .zip(litgraph_algorithms::degree_centrality(&view))
        .map(|(node, centrality)| (node.label.clone(), centrality))
        .collect()
}
