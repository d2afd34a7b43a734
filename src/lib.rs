//! Litgraph: research literature knowledge graph
//!
//! Assembles paper search results into a typed graph of papers, authors and
//! keyphrases, partitions it into communities, scores the partitions and
//! recommends related papers from embeddings.
//!
//! # Pipeline
//!
//! - [`ingest`]: `PaperRecord`s -> [`PaperGraph`] via the [`GraphBuilder`]
//! - [`algo`]: Louvain, Leiden and SLPA community detection plus quality
//!   evaluation (modularity, internal edge density, conductance)
//! - [`vector`]: embedding tables and cosine-similarity recommendations
//! - [`embed`]: keyphrase and embedding provider traits with built-ins
//!
//! Every stage takes and returns owned values; there is no global state.
//!
//! ## Example Usage
//!
//! ```rust
//! use litgraph::{detect, evaluate, CommunityAlgorithm, DetectionConfig, GraphBuilder, PaperRecord};
//! use litgraph::embed::TermFrequencyExtractor;
//!
//! let records = vec![
//!     PaperRecord::new("From Louvain to Leiden")
//!         .with_authors(["V. A. Traag", "L. Waltman"])
//!         .with_summary("Community detection with guaranteed connected communities."),
//!     PaperRecord::new("Fast unfolding of communities in large networks")
//!         .with_authors(["V. D. Blondel"])
//!         .with_summary("Modularity optimisation for community detection."),
//! ];
//!
//! let builder = GraphBuilder::new(TermFrequencyExtractor::new(5).unwrap());
//! let outcome = builder.build(&records);
//! assert!(outcome.report.is_clean());
//!
//! let detection = detect(&outcome.graph, CommunityAlgorithm::Leiden, &DetectionConfig::default());
//! assert_eq!(detection.partition.len(), outcome.graph.node_count());
//!
//! let report = evaluate(&outcome.graph, &detection.partition).unwrap();
//! assert!(report.conductance >= 0.0 && report.conductance <= 1.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod embed;
pub mod graph;
pub mod ingest;
pub mod vector;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, GraphError, GraphResult, Node, NodeAttributes, NodeId, NodeKind, PaperAttributes,
    PaperGraph, Relationship,
};

pub use ingest::{BuildOutcome, BuildReport, Diagnostic, GraphBuilder, PaperRecord};

pub use embed::{Embedder, KeyphraseExtractor, ProviderError, ProviderResult};

pub use algo::{
    degree_centrality, detect, detect_all, evaluate, graph_statistics, most_connected, CommunityAlgorithm,
    ConnectedNode, Detection, DetectionStatus, GraphStatistics, Partition, PartitionError, PartitionResult,
    QualityReport,
};

pub use vector::{
    coauthor_recommendations, cosine_similarity, embed_records, recommend, recommend_for_vector,
    EmbeddingPass, EmbeddingTable, Recommendation, VectorError, VectorResult,
};

pub use config::{
    ConfigError, ConfigResult, DetectionConfig, IngestConfig, LitGraphConfig, RecommendationConfig,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
