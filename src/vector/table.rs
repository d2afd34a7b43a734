//! Embedding table: paper label -> dense vector
//!
//! A table is a snapshot taken from a set of records. It is not kept in
//! sync with any graph; rebuild it when papers are added.

use super::{VectorError, VectorResult};
use crate::embed::Embedder;
use crate::graph::normalize_label;
use crate::ingest::{Diagnostic, PaperRecord};
use indexmap::IndexMap;
use tracing::{info, warn};

/// Fixed-dimension vectors keyed by paper label, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingTable {
    dimension: Option<usize>,
    entries: IndexMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    /// Empty table; the first insert fixes the dimension
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(dimension: usize) -> Self {
        EmbeddingTable {
            dimension: Some(dimension),
            entries: IndexMap::new(),
        }
    }

    /// Build a table from `(paper, vector)` pairs
    pub fn from_entries<I, S>(entries: I) -> VectorResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (paper, vector) in entries {
            table.insert(paper.as_ref(), vector)?;
        }
        Ok(table)
    }

    /// Insert or replace the vector for `paper`.
    ///
    /// A replaced entry keeps its original position. NaN or infinite
    /// components are rejected.
    pub fn insert(&mut self, paper: &str, vector: Vec<f32>) -> VectorResult<()> {
        let label = normalize_label(paper).ok_or_else(|| VectorError::UnknownEntity(paper.to_string()))?;
        if vector.is_empty() {
            return Err(VectorError::EmptyVector(label));
        }
        if !vector.iter().all(|x| x.is_finite()) {
            return Err(VectorError::NonFiniteVector(label));
        }
        match self.dimension {
            Some(expected) if expected != vector.len() => {
                return Err(VectorError::DimensionMismatch {
                    expected,
                    got: vector.len(),
                });
            }
            Some(_) => {}
            None => self.dimension = Some(vector.len()),
        }
        self.entries.insert(label, vector);
        Ok(())
    }

    pub fn get(&self, paper: &str) -> Option<&[f32]> {
        self.lookup(paper).map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, paper: &str) -> bool {
        self.lookup(paper).is_some()
    }

    /// Entry for `paper`, trying the raw label before normalising it
    pub(crate) fn lookup(&self, paper: &str) -> Option<(&str, &Vec<f32>)> {
        if let Some((label, vector)) = self.entries.get_key_value(paper) {
            return Some((label.as_str(), vector));
        }
        let label = normalize_label(paper)?;
        self.entries
            .get_key_value(label.as_str())
            .map(|(label, vector)| (label.as_str(), vector))
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn papers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Output of an embedding pass over a record set
#[derive(Debug, Clone)]
pub struct EmbeddingPass {
    pub table: EmbeddingTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Embed every record's title and summary.
///
/// Records without a title are skipped and provider failures are reported
/// per record; neither stops the pass. A repeated title keeps its first
/// position with the latest vector.
pub fn embed_records<E: Embedder>(records: &[PaperRecord], embedder: &E) -> EmbeddingPass {
    let mut table = EmbeddingTable::with_dimension(embedder.dimension());
    let mut diagnostics = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(title) = normalize_label(&record.title) else {
            diagnostics.push(Diagnostic::MalformedRecord {
                index,
                reason: "missing title".to_string(),
            });
            continue;
        };

        let inserted = embedder
            .embed(&record.embedding_text())
            .map_err(|e| e.to_string())
            .and_then(|vector| table.insert(&title, vector).map_err(|e| e.to_string()));

        if let Err(error) = inserted {
            let diagnostic = Diagnostic::ProviderFailure { index, title, error };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }
    }

    info!(
        "Embedded {} papers ({} dims), {} diagnostics",
        table.len(),
        embedder.dimension(),
        diagnostics.len()
    );
    EmbeddingPass { table, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{HashingEmbedder, ProviderError, ProviderResult};

    struct Flaky;

    impl Embedder for Flaky {
        fn dimension(&self) -> usize {
            2
        }

        fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
            if text.starts_with("Bad") {
                Err(ProviderError::Embedding("timeout".to_string()))
            } else if text.starts_with("Short") {
                Ok(vec![1.0])
            } else {
                Ok(vec![1.0, 0.0])
            }
        }
    }

    #[test]
    fn test_dimension_enforced() {
        let mut table = EmbeddingTable::new();
        table.insert("A", vec![1.0, 2.0]).unwrap();
        assert_eq!(table.dimension(), Some(2));
        assert_eq!(
            table.insert("B", vec![1.0]),
            Err(VectorError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(table.insert("C", vec![]), Err(VectorError::EmptyVector("C".to_string())));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut table = EmbeddingTable::new();
        assert_eq!(
            table.insert("N", vec![f32::NAN, 1.0]),
            Err(VectorError::NonFiniteVector("N".to_string()))
        );
        assert_eq!(
            table.insert("I", vec![f32::INFINITY]),
            Err(VectorError::NonFiniteVector("I".to_string()))
        );
        assert!(table.is_empty());
        assert_eq!(table.dimension(), None);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = EmbeddingTable::new();
        table.insert("A", vec![1.0]).unwrap();
        table.insert("B", vec![2.0]).unwrap();
        table.insert(" A ", vec![3.0]).unwrap();

        assert_eq!(table.papers().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(table.get("A"), Some(&[3.0][..]));
    }

    #[test]
    fn test_embed_records_fail_soft() {
        let records = vec![
            PaperRecord::new("Good paper"),
            PaperRecord::new("Bad paper"),
            PaperRecord::new(""),
            PaperRecord::new("Short vector"),
        ];
        let pass = embed_records(&records, &Flaky);

        assert_eq!(pass.table.len(), 1);
        assert!(pass.table.contains("Good paper"));
        assert_eq!(pass.diagnostics.len(), 3);
        assert!(matches!(pass.diagnostics[1], Diagnostic::MalformedRecord { index: 2, .. }));
    }

    #[test]
    fn test_embed_records_with_builtin_embedder() {
        let embedder = HashingEmbedder::new(16).unwrap();
        let records = vec![
            PaperRecord::new("Louvain").with_summary("modularity communities"),
            PaperRecord::new("Leiden").with_summary("modularity communities refined"),
        ];
        let pass = embed_records(&records, &embedder);
        assert_eq!(pass.table.len(), 2);
        assert_eq!(pass.table.dimension(), Some(16));
        assert!(pass.diagnostics.is_empty());
    }
}
