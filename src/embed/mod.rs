//! Keyphrase and embedding providers
//!
//! Both capabilities sit behind small traits so callers can plug in an
//! external model. Two lightweight built-ins make the crate usable on its own.

pub mod hashing;
pub mod keyphrase;

pub use hashing::HashingEmbedder;
pub use keyphrase::TermFrequencyExtractor;

use thiserror::Error;

/// Provider errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Keyphrase extraction failed
    #[error("Keyphrase extraction failed: {0}")]
    Keyphrase(String),

    /// Embedding generation failed
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Provider could not be set up
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Extracts an ordered list of keyphrases from free text
pub trait KeyphraseExtractor: Send + Sync {
    fn extract_keyphrases(&self, text: &str) -> ProviderResult<Vec<String>>;
}

/// Maps free text to a fixed-length dense vector
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder returns
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> ProviderResult<Vec<f32>>;
}

impl<T: KeyphraseExtractor + ?Sized> KeyphraseExtractor for &T {
    fn extract_keyphrases(&self, text: &str) -> ProviderResult<Vec<String>> {
        (**self).extract_keyphrases(text)
    }
}

impl<T: KeyphraseExtractor + ?Sized> KeyphraseExtractor for Box<T> {
    fn extract_keyphrases(&self, text: &str) -> ProviderResult<Vec<String>> {
        (**self).extract_keyphrases(text)
    }
}

impl<T: Embedder + ?Sized> Embedder for &T {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        (**self).embed(text)
    }
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        (**self).embed(text)
    }
}

/// Closure adapter, handy for stub providers
pub struct FnExtractor<F>(pub F);

impl<F> KeyphraseExtractor for FnExtractor<F>
where
    F: Fn(&str) -> ProviderResult<Vec<String>> + Send + Sync,
{
    fn extract_keyphrases(&self, text: &str) -> ProviderResult<Vec<String>> {
        (self.0)(text)
    }
}

/// English stop words, sorted for binary search
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may",
    "me", "more", "most", "must", "my", "new", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "out", "over", "own", "paper", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "use", "used",
    "using", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your",
];

pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}
