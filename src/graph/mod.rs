//! Paper graph data model
//!
//! - Paper, author and keyword nodes keyed by normalised label
//! - Undirected edges labelled `wrote` or `has_keyword`
//! - A read-only query facade over the built graph

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::{Node, NodeAttributes, PaperAttributes};
pub use store::{GraphError, GraphResult, PaperGraph};
pub use types::{normalize_label, EdgeId, NodeId, NodeKind, Relationship};
