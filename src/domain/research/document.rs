//! Research documents and their typed metadata

use serde::{Deserialize, Deserializer, Serialize};

const UNKNOWN: &str = "Unknown";

/// Author list as it may appear in raw metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    /// Semicolon-delimited string, e.g. `"Smith J; Doe A"`
    Delimited(String),
    /// Already split list
    List(Vec<String>),
}

impl Authors {
    /// Normalize to an ordered list of trimmed, non-empty names
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::Delimited(raw) => normalize_authors(raw),
            Self::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Split a semicolon-delimited author string
pub fn normalize_authors(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn deserialize_authors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Authors>::deserialize(deserializer)?;
    Ok(raw.map(|a| a.normalize()).unwrap_or_default())
}

fn default_unknown() -> String {
    UNKNOWN.to_string()
}

/// Bibliographic metadata attached to every document.
///
/// Defaults are applied once here (on construction or deserialization), so
/// downstream stages never re-default fields themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default = "default_unknown")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_authors")]
    pub authors: Vec<String>,
    #[serde(default = "default_unknown")]
    pub journal: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub pubmed_id: String,
    #[serde(default)]
    pub url: String,
    /// File or upload the document was ingested from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: default_unknown(),
            authors: Vec::new(),
            journal: default_unknown(),
            year: None,
            pubmed_id: String::new(),
            url: String::new(),
            source: None,
        }
    }
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_authors(mut self, authors: Authors) -> Self {
        self.authors = authors.normalize();
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_pubmed_id(mut self, pubmed_id: impl Into<String>) -> Self {
        self.pubmed_id = pubmed_id.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn has_pubmed_id(&self) -> bool {
        !self.pubmed_id.is_empty()
    }
}

/// A retrieved or ingested passage with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchDocument {
    pub content: String,
    pub metadata: DocumentMetadata,
    /// Similarity reported by the store at retrieval time, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl ResearchDocument {
    pub fn new(content: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
            similarity: None,
        }
    }

    pub fn with_similarity(mut self, similarity: f32) -> Self {
        self.similarity = Some(similarity);
        self
    }
}
