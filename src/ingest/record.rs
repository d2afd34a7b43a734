//! Normalised paper records, the unit the graph builder consumes

use serde::{Deserialize, Deserializer, Serialize};

fn unknown_source() -> String {
    "Unknown".to_string()
}

/// One search result from a bibliographic source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract text; keyphrases are extracted from it
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub link: String,

    /// Date or bare year, depending on the source
    #[serde(default, deserialize_with = "string_or_number")]
    pub published: String,

    #[serde(default = "unknown_source")]
    pub source: String,
}

impl PaperRecord {
    pub fn new(title: impl Into<String>) -> Self {
        PaperRecord {
            title: title.into(),
            authors: Vec::new(),
            summary: String::new(),
            link: String::new(),
            published: String::new(),
            source: unknown_source(),
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Text fed to the embedder: title then summary
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
