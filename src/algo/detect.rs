//! Community detection over a paper graph
//!
//! The algorithm is chosen from a closed set and dispatched once; every
//! variant returns the same shape: a partition covering every node plus a
//! convergence status.

use super::build_view;
use super::partition::Partition;
use crate::config::DetectionConfig;
use crate::graph::{NodeId, PaperGraph};
use indexmap::IndexMap;
use litgraph_algorithms::{
    leiden, louvain, slpa, CommunityResult, GraphView, LeidenConfig, LouvainConfig, SlpaConfig,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Supported detection algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityAlgorithm {
    /// Modularity-greedy local moving with aggregation
    Louvain,
    /// Louvain plus a refinement phase; communities are always connected
    Leiden,
    /// Speaker-listener label propagation
    Slpa,
}

impl CommunityAlgorithm {
    pub const ALL: [CommunityAlgorithm; 3] = [
        CommunityAlgorithm::Louvain,
        CommunityAlgorithm::Leiden,
        CommunityAlgorithm::Slpa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityAlgorithm::Louvain => "louvain",
            CommunityAlgorithm::Leiden => "leiden",
            CommunityAlgorithm::Slpa => "slpa",
        }
    }
}

impl fmt::Display for CommunityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown community algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for CommunityAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "louvain" => Ok(CommunityAlgorithm::Louvain),
            "leiden" => Ok(CommunityAlgorithm::Leiden),
            "slpa" => Ok(CommunityAlgorithm::Slpa),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Whether a run settled before its iteration cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionStatus {
    Converged { iterations: usize },
    /// The cap was hit; the partition is the best found so far
    NonConvergence { iterations: usize },
}

impl DetectionStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, DetectionStatus::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            DetectionStatus::Converged { iterations } | DetectionStatus::NonConvergence { iterations } => {
                iterations
            }
        }
    }
}

/// Result of one detection run
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub algorithm: CommunityAlgorithm,
    pub partition: Partition,
    pub status: DetectionStatus,
    /// SLPA only: per node, the labels of the nodes whose labels it holds
    /// above the configured threshold, most frequent first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memberships: Option<IndexMap<String, Vec<String>>>,
}

/// Partition `graph` with one algorithm
pub fn detect(graph: &PaperGraph, algorithm: CommunityAlgorithm, config: &DetectionConfig) -> Detection {
    let view = build_view(graph);
    detect_on_view(graph, &view, algorithm, config)
}

/// Run several algorithms in parallel over the same graph.
///
/// Results come back in the order the algorithms were requested.
pub fn detect_all(
    graph: &PaperGraph,
    algorithms: &[CommunityAlgorithm],
    config: &DetectionConfig,
) -> Vec<Detection> {
    let view = build_view(graph);
    algorithms
        .par_iter()
        .map(|&algorithm| detect_on_view(graph, &view, algorithm, config))
        .collect()
}

fn detect_on_view(
    graph: &PaperGraph,
    view: &GraphView,
    algorithm: CommunityAlgorithm,
    config: &DetectionConfig,
) -> Detection {
    debug!(
        "Running {} on {} nodes, {} edges",
        algorithm,
        view.node_count,
        view.edge_count()
    );

    let (result, memberships) = match algorithm {
        CommunityAlgorithm::Louvain => (louvain(view, &louvain_config(config)), None),
        CommunityAlgorithm::Leiden => (leiden(view, &leiden_config(config)), None),
        CommunityAlgorithm::Slpa => {
            let outcome = slpa(view, &slpa_config(config));
            let memberships = graph
                .nodes()
                .zip(outcome.memberships.iter())
                .map(|(node, labels)| {
                    let origins = labels
                        .iter()
                        .filter_map(|&origin| graph.node(NodeId::new(origin as u64)))
                        .map(|origin| origin.label.clone())
                        .collect();
                    (node.label.clone(), origins)
                })
                .collect();
            (outcome.communities, Some(memberships))
        }
    };

    let status = status_of(&result);
    match status {
        DetectionStatus::Converged { iterations } => info!(
            "{}: {} communities after {} iterations",
            algorithm,
            result.community_count(),
            iterations
        ),
        DetectionStatus::NonConvergence { iterations } => warn!(
            "{}: iteration cap reached after {} iterations, returning best partition ({} communities)",
            algorithm,
            iterations,
            result.community_count()
        ),
    }

    Detection {
        algorithm,
        partition: Partition::from_assignment(graph, &result.assignment),
        status,
        memberships,
    }
}

fn status_of(result: &CommunityResult) -> DetectionStatus {
    if result.converged {
        DetectionStatus::Converged {
            iterations: result.iterations,
        }
    } else {
        DetectionStatus::NonConvergence {
            iterations: result.iterations,
        }
    }
}

fn louvain_config(config: &DetectionConfig) -> LouvainConfig {
    LouvainConfig {
        resolution: config.resolution,
        max_iterations: config.max_iterations,
        max_levels: config.max_levels,
        min_modularity_gain: config.min_modularity_gain,
    }
}

fn leiden_config(config: &DetectionConfig) -> LeidenConfig {
    LeidenConfig {
        resolution: config.resolution,
        max_iterations: config.max_iterations,
        max_levels: config.max_levels,
    }
}

fn slpa_config(config: &DetectionConfig) -> SlpaConfig {
    SlpaConfig {
        rounds: config.slpa_rounds,
        stable_rounds: config.slpa_stable_rounds,
        tolerance: config.slpa_tolerance,
        threshold: config.slpa_threshold,
        seed: config.seed,
    }
}
