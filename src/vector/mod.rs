//! Embedding storage and similarity search

pub mod recommend;
pub mod table;

pub use recommend::{
    coauthor_recommendations, cosine_similarity, recommend, recommend_for_vector, Recommendation,
};
pub use table::{embed_records, EmbeddingPass, EmbeddingTable};

use thiserror::Error;

/// Errors raised by the embedding table and recommender
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Empty vector for {0}")]
    EmptyVector(String),

    #[error("Non-finite component in vector for {0}")]
    NonFiniteVector(String),
}

pub type VectorResult<T> = Result<T, VectorError>;
