//! Chunk documents and feed them to the vector store

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::loader::{extract_metadata_from_content, load_directory};
use super::splitter::TextSplitter;
use crate::domain::research::{normalize_authors, ResearchDocument, VectorStore};
use crate::domain::DomainError;

/// Caller-supplied metadata that wins over headers found in the text
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    /// Semicolon-delimited
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub year: Option<i32>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub chunks_added: usize,
    pub title: String,
    pub document_id: String,
}

#[derive(Debug, Clone)]
pub struct IngestionService {
    store: Arc<dyn VectorStore>,
    splitter: TextSplitter,
}

impl IngestionService {
    pub fn new(store: Arc<dyn VectorStore>, splitter: TextSplitter) -> Self {
        Self { store, splitter }
    }

    /// Split a document; every chunk carries the parent's metadata
    pub fn chunk_document(&self, document: &ResearchDocument) -> Vec<ResearchDocument> {
        self.splitter
            .split_text(&document.content)
            .into_iter()
            .map(|chunk| ResearchDocument::new(chunk, document.metadata.clone()))
            .collect()
    }

    pub async fn ingest_documents(
        &self,
        documents: Vec<ResearchDocument>,
    ) -> Result<usize, DomainError> {
        let chunks: Vec<ResearchDocument> = documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect();

        if chunks.is_empty() {
            return Ok(0);
        }

        self.store.add_documents(chunks).await
    }

    /// Ingest every `*.txt` paper in a directory, returning the chunk count
    pub async fn ingest_directory(&self, dir: &Path) -> Result<usize, DomainError> {
        let documents = load_directory(dir).await?;
        let paper_count = documents.len();
        let chunk_count = self.ingest_documents(documents).await?;

        info!(
            path = %dir.display(),
            papers = paper_count,
            chunks = chunk_count,
            "Corpus ingested"
        );

        Ok(chunk_count)
    }

    /// Ingest a single uploaded text
    pub async fn ingest_text(
        &self,
        text: &str,
        filename: Option<&str>,
        overrides: MetadataOverrides,
    ) -> Result<IngestReport, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "File is empty or text could not be extracted",
            ));
        }

        let source = filename
            .map(str::to_string)
            .unwrap_or_else(|| format!("upload-{}", Uuid::new_v4()));
        let mut metadata = extract_metadata_from_content(text, &source);

        if let Some(title) = overrides.title.filter(|t| !t.trim().is_empty()) {
            metadata.title = title;
        }
        if let Some(authors) = overrides.authors {
            metadata.authors = normalize_authors(&authors);
        }
        if let Some(journal) = overrides.journal.filter(|j| !j.trim().is_empty()) {
            metadata.journal = journal;
        }
        if let Some(year) = overrides.year {
            metadata.year = Some(year);
        }
        if let Some(url) = overrides.url.filter(|u| !u.trim().is_empty()) {
            metadata.url = url;
        }

        let title = metadata.title.clone();
        let document = ResearchDocument::new(text, metadata);
        let chunks_added = self.ingest_documents(vec![document]).await?;

        info!(document_id = %source, title = %title, chunks = chunks_added, "Document uploaded");

        Ok(IngestReport {
            chunks_added,
            title,
            document_id: source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::research::MockVectorStore;

    fn service(store: MockVectorStore) -> IngestionService {
        IngestionService::new(Arc::new(store), TextSplitter::new(40, 0).unwrap())
    }

    #[tokio::test]
    async fn test_ingest_text_applies_overrides() {
        let mut store = MockVectorStore::new();
        store
            .expect_add_documents()
            .withf(|docs| {
                docs.len() == 2
                    && docs.iter().all(|d| {
                        d.metadata.title == "Override title"
                            && d.metadata.journal == "BMJ"
                            && d.metadata.authors == vec!["A", "B"]
                            && d.metadata.year == Some(2019)
                    })
            })
            .times(1)
            .returning(|docs| Ok(docs.len()));

        let text = "Journal: Lancet\nTitle: Header title\n\nStatins reduce LDL cholesterol levels.";
        let overrides = MetadataOverrides {
            title: Some("Override title".into()),
            authors: Some("A; B".into()),
            journal: Some("BMJ".into()),
            year: Some(2019),
            url: None,
        };

        let report = service(store)
            .ingest_text(text, Some("statins.txt"), overrides)
            .await
            .unwrap();

        assert_eq!(report.chunks_added, 2);
        assert_eq!(report.title, "Override title");
        assert_eq!(report.document_id, "statins.txt");
    }

    #[tokio::test]
    async fn test_ingest_text_uses_headers_without_overrides() {
        let mut store = MockVectorStore::new();
        store
            .expect_add_documents()
            .returning(|docs| Ok(docs.len()));

        let report = service(store)
            .ingest_text("Title: Header title\nShort body.", None, MetadataOverrides::default())
            .await
            .unwrap();

        assert_eq!(report.title, "Header title");
        assert!(report.document_id.starts_with("upload-"));
    }

    #[tokio::test]
    async fn test_ingest_empty_text_rejected() {
        let mut store = MockVectorStore::new();
        store.expect_add_documents().never();

        let result = service(store)
            .ingest_text("  \n ", Some("empty.txt"), MetadataOverrides::default())
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockVectorStore::new();
        store
            .expect_add_documents()
            .returning(|_| Err(DomainError::vector_store("disk full")));

        let result = service(store)
            .ingest_text("Some text", Some("a.txt"), MetadataOverrides::default())
            .await;

        assert!(matches!(result, Err(DomainError::VectorStore(_))));
    }

    #[tokio::test]
    async fn test_ingest_missing_directory_is_empty() {
        let mut store = MockVectorStore::new();
        store.expect_add_documents().never();

        let count = service(store)
            .ingest_directory(Path::new("/no/such/corpus"))
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
