//! Edge implementation for the paper graph
//!
//! Edges are undirected; `source` and `target` only record the order in
//! which the endpoints were given when the edge was first added.

use super::types::{EdgeId, NodeId, Relationship};
use serde::{Deserialize, Serialize};

/// An undirected, unweighted edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub relationship: Relationship,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, relationship: Relationship) -> Self {
        Edge {
            id,
            source,
            target,
            relationship,
        }
    }

    /// Canonical unordered key for the endpoint pair
    pub(crate) fn key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        Edge::key(self.source, self.target) == Edge::key(other.source, other.target)
    }
}

impl Eq for Edge {}
