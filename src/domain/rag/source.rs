//! Source records returned alongside an answer

use serde::{Deserialize, Serialize};

use crate::domain::research::ResearchDocument;

/// Display relevance assigned to every record at generation time.
///
/// This is not the retrieval similarity, which stays on the document.
pub const GENERATED_RELEVANCE_SCORE: f64 = 0.85;

/// One cited-able source, numbered from 1 in context order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub year: Option<i32>,
    #[serde(rename = "pubmedId")]
    pub pubmed_id: String,
    pub url: String,
    pub relevance_score: Option<f64>,
}

impl SourceRecord {
    pub fn from_document(index: usize, document: &ResearchDocument) -> Self {
        let metadata = &document.metadata;
        Self {
            id: index.to_string(),
            title: metadata.title.clone(),
            authors: metadata.authors.clone(),
            journal: metadata.journal.clone(),
            year: metadata.year,
            pubmed_id: metadata.pubmed_id.clone(),
            url: metadata.url.clone(),
            relevance_score: Some(GENERATED_RELEVANCE_SCORE),
        }
    }
}

/// One record per input document, regardless of which were cited
pub fn build_sources(documents: &[ResearchDocument]) -> Vec<SourceRecord> {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| SourceRecord::from_document(i + 1, doc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::research::{Authors, DocumentMetadata};

    #[test]
    fn test_build_sources_numbers_from_one() {
        let docs = vec![
            ResearchDocument::new(
                "a",
                DocumentMetadata::default()
                    .with_title("First")
                    .with_authors(Authors::Delimited("A; B ; C".into()))
                    .with_pubmed_id("111"),
            )
            .with_similarity(0.42),
            ResearchDocument::new("b", DocumentMetadata::default()),
        ];

        let sources = build_sources(&docs);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].id, "1");
        assert_eq!(sources[0].authors, vec!["A", "B", "C"]);
        assert_eq!(sources[0].relevance_score, Some(GENERATED_RELEVANCE_SCORE));
        assert_eq!(sources[1].id, "2");
        assert_eq!(sources[1].title, "Unknown");
        assert_eq!(sources[1].year, None);
    }

    #[test]
    fn test_serialized_field_names() {
        let docs = vec![ResearchDocument::new(
            "a",
            DocumentMetadata::default().with_pubmed_id("999").with_year(2021),
        )];
        let json = serde_json::to_value(&build_sources(&docs)[0]).unwrap();

        assert_eq!(json["pubmedId"], "999");
        assert_eq!(json["year"], 2021);
        assert_eq!(json["relevance_score"], 0.85);
    }
}
