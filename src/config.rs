//! Runtime configuration
//!
//! Loaded from YAML; every field has a default so a partial (or empty)
//! file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LitGraphConfig {
    pub ingest: IngestConfig,
    pub detection: DetectionConfig,
    pub recommendation: RecommendationConfig,
}

/// Graph building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Keyphrases kept per record
    pub max_keyphrases: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { max_keyphrases: 5 }
    }
}

/// Community detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Modularity resolution; 1.0 is the standard objective
    pub resolution: f64,

    /// Local-moving sweeps per level
    pub max_iterations: usize,

    /// Aggregation levels
    pub max_levels: usize,

    /// Smallest modularity gain that still counts as progress between levels
    pub min_modularity_gain: f64,

    /// SLPA speaker/listener rounds
    pub slpa_rounds: usize,

    /// Trailing SLPA rounds that must be settled to report convergence
    pub slpa_stable_rounds: usize,

    /// Share of nodes allowed to change community in a settled SLPA round
    pub slpa_tolerance: f64,

    /// Minimum history frequency for an SLPA overlapping membership
    pub slpa_threshold: f64,

    /// Seed for the randomised label propagation
    pub seed: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
            slpa_rounds: 20,
            slpa_stable_rounds: 3,
            slpa_tolerance: 0.1,
            slpa_threshold: 0.1,
            seed: 42,
        }
    }
}

/// Similarity recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub top_n: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl LitGraphConfig {
    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let d = &self.detection;
        if !(d.resolution > 0.0 && d.resolution.is_finite()) {
            return Err(invalid("detection.resolution", "must be a positive number"));
        }
        if d.max_iterations == 0 {
            return Err(invalid("detection.max_iterations", "must be at least 1"));
        }
        if d.max_levels == 0 {
            return Err(invalid("detection.max_levels", "must be at least 1"));
        }
        if !(d.min_modularity_gain >= 0.0 && d.min_modularity_gain.is_finite()) {
            return Err(invalid("detection.min_modularity_gain", "must be non-negative"));
        }
        if d.slpa_rounds == 0 {
            return Err(invalid("detection.slpa_rounds", "must be at least 1"));
        }
        if d.slpa_stable_rounds == 0 || d.slpa_stable_rounds > d.slpa_rounds {
            return Err(invalid("detection.slpa_stable_rounds", "must be between 1 and slpa_rounds"));
        }
        if !(0.0..=1.0).contains(&d.slpa_tolerance) {
            return Err(invalid("detection.slpa_tolerance", "must be in [0, 1]"));
        }
        if !(d.slpa_threshold > 0.0 && d.slpa_threshold <= 1.0) {
            return Err(invalid("detection.slpa_threshold", "must be in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
