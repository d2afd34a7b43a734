//! In-memory storage for the paper graph
//!
//! Nodes live in an arena indexed by `NodeId`; a label index maps each
//! normalised label to its node. Adjacency keeps insertion order so every
//! traversal, and therefore every downstream algorithm, is deterministic.

use super::edge::Edge;
use super::node::{Node, NodeAttributes, PaperAttributes};
use super::types::{normalize_label, EdgeId, NodeId, NodeKind, Relationship};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur during graph queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Undirected, unweighted graph of papers, authors and keywords.
///
/// Mutation goes through the upsert and `add_edge` methods, which the
/// ingest builder drives; everything else is a read-only query facade.
#[derive(Debug, Clone, Default)]
pub struct PaperGraph {
    /// Node arena, `nodes[id]` is the node with that id
    nodes: Vec<Node>,

    /// Normalised label -> node
    label_index: FxHashMap<String, NodeId>,

    /// Neighbour sets in insertion order, parallel to `nodes`
    adjacency: Vec<IndexSet<NodeId>>,

    /// Edge arena
    edges: Vec<Edge>,

    /// Canonical endpoint pair -> edge
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl PaperGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a paper or overwrite the attributes of an existing node with
    /// the same label. Returns `None` if the label normalises to nothing.
    pub fn upsert_paper(&mut self, label: &str, attributes: PaperAttributes) -> Option<NodeId> {
        let label = normalize_label(label)?;
        match self.label_index.get(&label) {
            Some(&id) => {
                self.nodes[id.index()].attributes = NodeAttributes::Paper(attributes);
                Some(id)
            }
            None => Some(self.insert(label, NodeAttributes::Paper(attributes))),
        }
    }

    /// Insert an author unless a node with the same label already exists
    pub fn upsert_author(&mut self, label: &str) -> Option<NodeId> {
        self.upsert_plain(label, NodeAttributes::Author)
    }

    /// Insert a keyword unless a node with the same label already exists
    pub fn upsert_keyword(&mut self, label: &str) -> Option<NodeId> {
        self.upsert_plain(label, NodeAttributes::Keyword)
    }

    fn upsert_plain(&mut self, label: &str, attributes: NodeAttributes) -> Option<NodeId> {
        let label = normalize_label(label)?;
        match self.label_index.get(&label) {
            Some(&id) => Some(id),
            None => Some(self.insert(label, attributes)),
        }
    }

    fn insert(&mut self, label: String, attributes: NodeAttributes) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.label_index.insert(label.clone(), id);
        self.nodes.push(Node::new(id, label, attributes));
        self.adjacency.push(IndexSet::new());
        id
    }

    /// Connect two nodes by label.
    ///
    /// Self-loops are ignored and return `Ok(None)`. Adding an edge between
    /// already-connected nodes keeps the single edge and replaces its
    /// relationship.
    pub fn add_edge(&mut self, a: &str, b: &str, relationship: Relationship) -> GraphResult<Option<EdgeId>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.connect(a, b, relationship))
    }

    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId, relationship: Relationship) -> Option<EdgeId> {
        if a == b {
            return None;
        }
        let key = Edge::key(a, b);
        if let Some(&existing) = self.edge_index.get(&key) {
            self.edges[existing.as_u64() as usize].relationship = relationship;
            return Some(existing);
        }

        let id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(id, a, b, relationship));
        self.edge_index.insert(key, id);
        self.adjacency[a.index()].insert(b);
        self.adjacency[b.index()].insert(a);
        Some(id)
    }

    fn resolve(&self, label: &str) -> GraphResult<NodeId> {
        self.node_id(label)
            .ok_or_else(|| GraphError::UnknownEntity(label.to_string()))
    }

    /// Look up a node id by label; the label is normalised first
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        if let Some(&id) = self.label_index.get(label) {
            return Some(id);
        }
        let normalized = normalize_label(label)?;
        self.label_index.get(&normalized).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.node_id(label).is_some()
    }

    /// Get a node by label
    pub fn get_node(&self, label: &str) -> Option<&Node> {
        self.node_id(label).map(|id| &self.nodes[id.index()])
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Nodes of one kind, in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.kind() == kind).collect()
    }

    /// Neighbours of a node, in the order the edges were added
    pub fn neighbors(&self, label: &str) -> GraphResult<Vec<&Node>> {
        let id = self.resolve(label)?;
        Ok(self.neighbor_ids(id).map(|n| &self.nodes[n.index()]).collect())
    }

    /// Neighbour ids of a node; empty for an unknown id
    pub fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(id.index())
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of distinct neighbours
    pub fn degree(&self, label: &str) -> GraphResult<usize> {
        let id = self.resolve(label)?;
        Ok(self.adjacency[id.index()].len())
    }

    /// Relationship on the edge between two nodes, `None` if not adjacent
    pub fn edge_label(&self, a: &str, b: &str) -> GraphResult<Option<Relationship>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.edge_between(a, b).map(|e| e.relationship))
    }

    /// The edge between two node ids, if any
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edge_index
            .get(&Edge::key(a, b))
            .map(|id| &self.edges[id.as_u64() as usize])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(source: &str) -> PaperAttributes {
        PaperAttributes {
            link: String::new(),
            source: source.to_string(),
            published: "2024".to_string(),
        }
    }

    fn small_graph() -> PaperGraph {
        let mut graph = PaperGraph::new();
        graph.upsert_paper("P1", paper("arXiv")).unwrap();
        graph.upsert_author("Alice").unwrap();
        graph.upsert_keyword("graphs").unwrap();
        graph.add_edge("Alice", "P1", Relationship::Wrote).unwrap();
        graph.add_edge("P1", "graphs", Relationship::HasKeyword).unwrap();
        graph
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut graph = PaperGraph::new();
        let a = graph.upsert_author("Alice").unwrap();
        let b = graph.upsert_author("  Alice ").unwrap();
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_blank_label_is_rejected() {
        let mut graph = PaperGraph::new();
        assert!(graph.upsert_keyword("   ").is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_paper_upsert_overwrites_attributes() {
        let mut graph = PaperGraph::new();
        graph.upsert_paper("P1", paper("arXiv")).unwrap();
        graph.upsert_paper("P1", paper("PubMed")).unwrap();

        let node = graph.get_node("P1").unwrap();
        assert_eq!(node.paper().unwrap().source, "PubMed");
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_plain_upsert_keeps_existing_kind() {
        let mut graph = PaperGraph::new();
        graph.upsert_paper("Transformers", paper("arXiv")).unwrap();
        graph.upsert_keyword("Transformers").unwrap();
        assert_eq!(graph.get_node("Transformers").unwrap().kind(), NodeKind::Paper);
    }

    #[test]
    fn test_self_loop_is_ignored() {
        let mut graph = PaperGraph::new();
        graph.upsert_author("Alice").unwrap();
        assert_eq!(graph.add_edge("Alice", "Alice", Relationship::Wrote), Ok(None));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree("Alice"), Ok(0));
    }

    #[test]
    fn test_duplicate_edge_replaces_relationship() {
        let mut graph = small_graph();
        let first = graph.add_edge("P1", "Alice", Relationship::HasKeyword).unwrap();
        assert_eq!(first, Some(EdgeId::new(0)));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_label("Alice", "P1"), Ok(Some(Relationship::HasKeyword)));
    }

    #[test]
    fn test_query_facade() {
        let graph = small_graph();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("P1"), Ok(2));

        let neighbors: Vec<&str> = graph
            .neighbors("P1")
            .unwrap()
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(neighbors, vec!["Alice", "graphs"]);

        assert_eq!(graph.edge_label("graphs", "P1"), Ok(Some(Relationship::HasKeyword)));
        assert_eq!(graph.edge_label("Alice", "graphs"), Ok(None));
        assert_eq!(graph.nodes_of_kind(NodeKind::Author).len(), 1);
    }

    #[test]
    fn test_unknown_entity() {
        let mut graph = small_graph();
        let err = graph.degree("Bob").unwrap_err();
        assert_eq!(err, GraphError::UnknownEntity("Bob".to_string()));
        assert!(graph.neighbors("Bob").is_err());
        assert!(graph.edge_label("P1", "Bob").is_err());
        assert!(graph.add_edge("P1", "Bob", Relationship::Wrote).is_err());
    }
}
