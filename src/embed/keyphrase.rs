//! Term-frequency keyphrase extraction
//!
//! Candidate phrases are maximal runs of content words between stop words
//! and punctuation. A phrase scores the sum of its words' frequencies in
//! the text; ties keep first-appearance order.

use super::{is_stop_word, KeyphraseExtractor, ProviderError, ProviderResult};
use indexmap::IndexMap;
use regex::Regex;
use rustc_hash::FxHashMap;

/// Longest candidate phrase, in words
const MAX_PHRASE_WORDS: usize = 3;

/// Word or single punctuation mark
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}][\p{L}\p{N}'\-]*|[^\p{L}\p{N}\s]";

/// Built-in keyphrase extractor, no model required
#[derive(Debug, Clone)]
pub struct TermFrequencyExtractor {
    max_phrases: usize,
    token_re: Regex,
}

impl TermFrequencyExtractor {
    pub fn new(max_phrases: usize) -> ProviderResult<Self> {
        let token_re = Regex::new(TOKEN_PATTERN)
            .map_err(|e| ProviderError::ConfigError(e.to_string()))?;
        Ok(Self { max_phrases, token_re })
    }

    pub fn max_phrases(&self) -> usize {
        self.max_phrases
    }

    fn candidates(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for token in self.token_re.find_iter(text) {
            let word = token.as_str().to_lowercase();
            let is_word = word.chars().next().is_some_and(char::is_alphanumeric);
            if !is_word || word.chars().count() < 2 || is_stop_word(&word) {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(word);
            if current.len() == MAX_PHRASE_WORDS {
                phrases.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }
        phrases
    }
}

impl KeyphraseExtractor for TermFrequencyExtractor {
    fn extract_keyphrases(&self, text: &str) -> ProviderResult<Vec<String>> {
        let candidates = self.candidates(text);

        let mut frequency: FxHashMap<&str, usize> = FxHashMap::default();
        for word in candidates.iter().flatten() {
            *frequency.entry(word.as_str()).or_insert(0) += 1;
        }

        let mut scored: IndexMap<String, usize> = IndexMap::new();
        for phrase in &candidates {
            let score = phrase.iter().map(|w| frequency[w.as_str()]).sum();
            scored.entry(phrase.join(" ")).or_insert(score);
        }

        let mut ranked: Vec<(String, usize)> = scored.into_iter().collect();
        // stable: equal scores stay in first-appearance order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_phrases);

        Ok(ranked.into_iter().map(|(phrase, _)| phrase).collect())
    }
}
