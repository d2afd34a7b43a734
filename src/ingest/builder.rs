//! Graph builder: paper records in, typed deduplicated graph out
//!
//! Per record:
//! - a paper node keyed by title, attributes overwritten by the latest record
//! - an author node and a `wrote` edge for every non-empty author name
//! - a keyword node and a `has_keyword` edge for each extracted keyphrase
//!
//! Bad records, provider failures and names that already belong to a node of
//! another kind are collected as diagnostics; they never abort the build.

use super::record::PaperRecord;
use crate::config::IngestConfig;
use crate::embed::KeyphraseExtractor;
use crate::graph::{normalize_label, NodeKind, PaperAttributes, PaperGraph, Relationship};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Non-fatal per-record problem
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The record was skipped
    #[error("Malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// A provider call failed; the record was kept without its derived data
    #[error("Provider failure on record #{index} ({title}): {error}")]
    ProviderFailure {
        index: usize,
        title: String,
        error: String,
    },

    /// A name resolved to a node of another kind; edges that would join the
    /// wrong kinds were not added
    #[error("Record #{index}: \"{label}\" is already a {found} node, expected {expected}")]
    KindCollision {
        index: usize,
        label: String,
        expected: NodeKind,
        found: NodeKind,
    },
}

/// Summary of one build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub records_seen: usize,
    pub records_used: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn malformed_records(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedRecord { .. }))
            .count()
    }

    pub fn provider_failures(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::ProviderFailure { .. }))
            .count()
    }

    pub fn kind_collisions(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::KindCollision { .. }))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A built graph together with its build report
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: PaperGraph,
    pub report: BuildReport,
}

/// Turns paper records into a [`PaperGraph`]
pub struct GraphBuilder<E> {
    extractor: E,
    max_keyphrases: usize,
}

impl<E: KeyphraseExtractor> GraphBuilder<E> {
    pub fn new(extractor: E) -> Self {
        Self::from_config(extractor, &IngestConfig::default())
    }

    pub fn from_config(extractor: E, config: &IngestConfig) -> Self {
        Self {
            extractor,
            max_keyphrases: config.max_keyphrases,
        }
    }

    /// Cap on keyphrases kept per record
    pub fn with_max_keyphrases(mut self, max_keyphrases: usize) -> Self {
        self.max_keyphrases = max_keyphrases;
        self
    }

    /// Build a fresh graph from `records`
    pub fn build(&self, records: &[PaperRecord]) -> BuildOutcome {
        let mut graph = PaperGraph::new();
        let mut report = BuildReport {
            records_seen: records.len(),
            ..BuildReport::default()
        };

        for (index, record) in records.iter().enumerate() {
            match self.add_record(&mut graph, index, record, &mut report.diagnostics) {
                Ok(()) => report.records_used += 1,
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    if let Diagnostic::ProviderFailure { .. } = diagnostic {
                        report.records_used += 1;
                    }
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            "Built graph: {} nodes ({} papers, {} authors, {} keywords), {} edges from {} records, {} diagnostics",
            graph.node_count(),
            graph.nodes_of_kind(NodeKind::Paper).len(),
            graph.nodes_of_kind(NodeKind::Author).len(),
            graph.nodes_of_kind(NodeKind::Keyword).len(),
            graph.edge_count(),
            records.len(),
            report.diagnostics.len()
        );

        BuildOutcome { graph, report }
    }

    fn add_record(
        &self,
        graph: &mut PaperGraph,
        index: usize,
        record: &PaperRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), Diagnostic> {
        let mut collide = |label: &str, expected: NodeKind, found: NodeKind| {
            let diagnostic = Diagnostic::KindCollision {
                index,
                label: label.to_string(),
                expected,
                found,
            };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        };

        let attributes = PaperAttributes {
            link: record.link.clone(),
            source: record.source.clone(),
            published: record.published.clone(),
        };
        let previous_kind = graph.get_node(&record.title).map(|node| node.kind());
        let paper = graph
            .upsert_paper(&record.title, attributes)
            .ok_or_else(|| Diagnostic::MalformedRecord {
                index,
                reason: "missing title".to_string(),
            })?;
        if let Some(found) = previous_kind.filter(|&kind| kind != NodeKind::Paper) {
            collide(&normalize_label(&record.title).unwrap_or_default(), NodeKind::Paper, found);
        }

        for name in &record.authors {
            let Some(author) = graph.upsert_author(name) else {
                continue;
            };
            match graph.node(author).map(|node| (node.kind(), node.label.clone())) {
                Some((NodeKind::Author, _)) => {
                    graph.connect(author, paper, Relationship::Wrote);
                }
                Some((found, label)) => collide(&label, NodeKind::Author, found),
                None => {}
            }
        }

        let keyphrases = self
            .extractor
            .extract_keyphrases(&record.summary)
            .map_err(|e| Diagnostic::ProviderFailure {
                index,
                title: normalize_label(&record.title).unwrap_or_default(),
                error: e.to_string(),
            })?;

        debug!("Record #{}: {} keyphrases", index, keyphrases.len());
        for phrase in keyphrases.iter().take(self.max_keyphrases) {
            let Some(keyword) = graph.upsert_keyword(phrase) else {
                continue;
            };
            if keyword == paper {
                continue;
            }
            match graph.node(keyword).map(|node| (node.kind(), node.label.clone())) {
                Some((NodeKind::Keyword, _)) => {
                    graph.connect(paper, keyword, Relationship::HasKeyword);
                }
                Some((found, label)) => collide(&label, NodeKind::Keyword, found),
                None => {}
            }
        }
        Ok(())
    }
}
