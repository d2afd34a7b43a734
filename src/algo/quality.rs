//! Partition quality evaluation

use super::build_view;
use super::partition::Partition;
use crate::graph::PaperGraph;
use litgraph_algorithms::{partition_quality, CommunityId, PartitionQuality};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the evaluator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    #[error("Invalid partition: node {node:?} has no community")]
    InvalidPartition { node: String },
}

pub type PartitionResult<T> = Result<T, PartitionError>;

/// Quality scores for one partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    /// `None` when the graph has no edges
    pub modularity: Option<f64>,
    pub internal_edge_density: f64,
    pub conductance: f64,
}

impl From<PartitionQuality> for QualityReport {
    fn from(quality: PartitionQuality) -> Self {
        QualityReport {
            modularity: quality.modularity,
            internal_edge_density: quality.internal_edge_density,
            conductance: quality.conductance,
        }
    }
}

/// Score `partition` against `graph`.
///
/// Every graph node must be assigned. Labels the graph does not contain are
/// ignored.
pub fn evaluate(graph: &PaperGraph, partition: &Partition) -> PartitionResult<QualityReport> {
    let assignment = graph
        .nodes()
        .map(|node| {
            partition
                .community_of(&node.label)
                .ok_or_else(|| PartitionError::InvalidPartition {
                    node: node.label.clone(),
                })
        })
        .collect::<PartitionResult<Vec<CommunityId>>>()?;

    if partition.len() > assignment.len() {
        debug!(
            "Partition carries {} labels not in the graph",
            partition.len() - assignment.len()
        );
    }

    let view = build_view(graph);
    Ok(partition_quality(&view, &assignment).into())
}
