//! Record ingestion
//!
//! Converts normalised paper records into a [`PaperGraph`](crate::graph::PaperGraph).

pub mod builder;
pub mod record;

pub use builder::{BuildOutcome, BuildReport, Diagnostic, GraphBuilder};
pub use record::PaperRecord;
