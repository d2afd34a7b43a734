//! Similarity recommendations
//!
//! Papers are ranked by cosine similarity of their embeddings. Ranking is a
//! stable sort, so equal scores keep table order. A score that is not a
//! number (from overflowing components) ranks last.

use super::table::EmbeddingTable;
use super::{VectorError, VectorResult};
use crate::graph::{GraphError, GraphResult, NodeId, NodeKind, PaperGraph};
use serde::Serialize;

/// One ranked paper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub paper: String,
    pub score: f32,
}

/// Cosine similarity of two vectors; 0 if either has zero length
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Papers most similar to `target`, best first, target excluded
pub fn recommend(table: &EmbeddingTable, target: &str, top_n: usize) -> VectorResult<Vec<Recommendation>> {
    let (target, query) = table
        .lookup(target)
        .ok_or_else(|| VectorError::UnknownEntity(target.to_string()))?;
    Ok(rank(table, query, Some(target), top_n))
}

/// Every paper ranked against an arbitrary query vector, best first
pub fn recommend_for_vector(
    table: &EmbeddingTable,
    query: &[f32],
    top_n: usize,
) -> VectorResult<Vec<Recommendation>> {
    if query.is_empty() {
        return Err(VectorError::EmptyVector("query".to_string()));
    }
    if !query.iter().all(|x| x.is_finite()) {
        return Err(VectorError::NonFiniteVector("query".to_string()));
    }
    if let Some(expected) = table.dimension() {
        if expected != query.len() {
            return Err(VectorError::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }
    }
    Ok(rank(table, query, None, top_n))
}

fn rank(table: &EmbeddingTable, query: &[f32], exclude: Option<&str>, top_n: usize) -> Vec<Recommendation> {
    let mut scored: Vec<Recommendation> = table
        .iter()
        .filter(|(paper, _)| Some(*paper) != exclude)
        .map(|(paper, vector)| {
            let score = cosine_similarity(query, vector);
            Recommendation {
                paper: paper.to_string(),
                score: if score.is_nan() { f32::NEG_INFINITY } else { score },
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Papers sharing at least one author with `target`, in graph order.
///
/// Fails if `target` is missing or is not a paper.
pub fn coauthor_recommendations(graph: &PaperGraph, target: &str, top_n: usize) -> GraphResult<Vec<String>> {
    let paper = graph
        .get_node(target)
        .filter(|node| node.kind() == NodeKind::Paper)
        .ok_or_else(|| GraphError::UnknownEntity(target.to_string()))?;

    let mut related: Vec<NodeId> = graph
        .neighbor_ids(paper.id)
        .filter(|&id| graph.node(id).is_some_and(|n| n.kind() == NodeKind::Author))
        .flat_map(|author| graph.neighbor_ids(author))
        .filter(|&id| id != paper.id && graph.node(id).is_some_and(|n| n.kind() == NodeKind::Paper))
        .collect();
    related.sort_unstable();
    related.dedup();

    Ok(related
        .into_iter()
        .take(top_n)
        .filter_map(|id| graph.node(id).map(|n| n.label.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_entries([
            ("A", vec![1.0, 0.0]),
            ("B", vec![1.0, 0.0]),
            ("C", vec![0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_recommend_excludes_target() {
        let recs = recommend(&table(), "A", 2).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].paper, "B");
        assert!((recs[0].score - 1.0).abs() < 1e-6);
        assert_eq!(recs[1].paper, "C");
        assert!(recs[1].score.abs() < 1e-6);
    }

    #[test]
    fn test_recommend_ties_keep_table_order() {
        let table = EmbeddingTable::from_entries([
            ("T", vec![1.0, 1.0]),
            ("X", vec![1.0, 0.0]),
            ("Y", vec![0.0, 1.0]),
        ])
        .unwrap();
        let papers: Vec<String> = recommend(&table, "T", 5).unwrap().into_iter().map(|r| r.paper).collect();
        assert_eq!(papers, vec!["X", "Y"]);
    }

    #[test]
    fn test_recommend_unknown_target() {
        assert_eq!(
            recommend(&table(), "Z", 3),
            Err(VectorError::UnknownEntity("Z".to_string()))
        );
    }

    #[test]
    fn test_recommend_for_vector() {
        let recs = recommend_for_vector(&table(), &[0.0, 2.0], 1).unwrap();
        assert_eq!(recs, vec![Recommendation { paper: "C".to_string(), score: 1.0 }]);

        assert!(matches!(
            recommend_for_vector(&table(), &[1.0], 1),
            Err(VectorError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_overflowing_scores_rank_last() {
        let table = EmbeddingTable::from_entries([
            ("Huge", vec![3.0e38, 3.0e38]),
            ("Unit", vec![1.0, 0.0]),
            ("Other", vec![0.0, 1.0]),
        ])
        .unwrap();
        let recs = recommend_for_vector(&table, &[1.0, 1.0], 3).unwrap();
        let papers: Vec<&str> = recs.iter().map(|r| r.paper.as_str()).collect();
        assert_eq!(papers, vec!["Unit", "Other", "Huge"]);
        assert_eq!(recs[2].score, f32::NEG_INFINITY);
    }

    #[test]
    fn test_non_finite_query_rejected() {
        assert_eq!(
            recommend_for_vector(&table(), &[f32::NAN, 1.0], 1),
            Err(VectorError::NonFiniteVector("query".to_string()))
        );
    }
}
