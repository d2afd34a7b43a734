//! Partition: node label -> community id

use crate::graph::PaperGraph;
use indexmap::IndexMap;
use litgraph_algorithms::CommunityId;
use serde::{Deserialize, Serialize};

/// Assignment of graph nodes to communities, in graph node order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition {
    assignment: IndexMap<String, CommunityId>,
}

impl Partition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each graph node with the community at the same view index
    pub(crate) fn from_assignment(graph: &PaperGraph, assignment: &[CommunityId]) -> Self {
        graph
            .nodes()
            .zip(assignment.iter())
            .map(|(node, &community)| (node.label.clone(), community))
            .collect()
    }

    /// Assign `label`, returning its previous community if any
    pub fn insert(&mut self, label: impl Into<String>, community: CommunityId) -> Option<CommunityId> {
        self.assignment.insert(label.into(), community)
    }

    pub fn community_of(&self, label: &str) -> Option<CommunityId> {
        self.assignment.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CommunityId)> {
        self.assignment.iter().map(|(label, &c)| (label.as_str(), c))
    }

    /// Number of distinct community ids
    pub fn community_count(&self) -> usize {
        self.communities().len()
    }

    /// Members grouped by community, communities in order of first appearance
    pub fn communities(&self) -> IndexMap<CommunityId, Vec<&str>> {
        let mut groups: IndexMap<CommunityId, Vec<&str>> = IndexMap::new();
        for (label, &community) in &self.assignment {
            groups.entry(community).or_default().push(label.as_str());
        }
        groups
    }

    /// True when both nodes are assigned and share a community
    pub fn same_community(&self, a: &str, b: &str) -> bool {
        match (self.community_of(a), self.community_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }
}

impl<S: Into<String>> FromIterator<(S, CommunityId)> for Partition {
    fn from_iter<I: IntoIterator<Item = (S, CommunityId)>>(iter: I) -> Self {
        Partition {
            assignment: iter.into_iter().map(|(label, c)| (label.into(), c)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = (&'a String, &'a CommunityId);
    type IntoIter = indexmap::map::Iter<'a, String, CommunityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignment.iter()
    }
}
