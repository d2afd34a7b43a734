//! Node implementation for the paper graph
//!
//! A node is identified by its normalised label. Attributes are a tagged
//! variant per kind, so only papers carry bibliographic fields.

use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// Bibliographic attributes of a paper node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperAttributes {
    /// Landing page, DOI or entry URL
    pub link: String,
    /// Bibliographic source the record came from (e.g. "arXiv")
    pub source: String,
    /// Publication date or year as reported by the source
    pub published: String,
}

/// Per-kind node attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeAttributes {
    Paper(PaperAttributes),
    Author,
    Keyword,
}

impl NodeAttributes {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeAttributes::Paper(_) => NodeKind::Paper,
            NodeAttributes::Author => NodeKind::Author,
            NodeAttributes::Keyword => NodeKind::Keyword,
        }
    }
}

/// A node in the paper graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Dense identifier, stable for the lifetime of the graph
    pub id: NodeId,
    /// Normalised label; the identity and dedup key
    pub label: String,
    /// Kind-specific attributes
    pub attributes: NodeAttributes,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, attributes: NodeAttributes) -> Self {
        Node {
            id,
            label: label.into(),
            attributes,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.attributes.kind()
    }

    pub fn is_paper(&self) -> bool {
        matches!(self.attributes, NodeAttributes::Paper(_))
    }

    /// Paper attributes, if this is a paper
    pub fn paper(&self) -> Option<&PaperAttributes> {
        match &self.attributes {
            NodeAttributes::Paper(attrs) => Some(attrs),
            NodeAttributes::Author | NodeAttributes::Keyword => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}
