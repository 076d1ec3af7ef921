//! Plain-text research paper loading

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::research::{normalize_authors, DocumentMetadata, ResearchDocument};
use crate::domain::DomainError;

/// Year recorded for papers whose header carries none
pub const DEFAULT_INGEST_YEAR: i32 = 2023;

const HEADER_SCAN_LINES: usize = 20;

/// Read bibliographic headers (`Title:`, `Authors:`, ...) from the top of a paper
pub fn extract_metadata_from_content(content: &str, filename: &str) -> DocumentMetadata {
    let mut metadata = DocumentMetadata::default()
        .with_year(DEFAULT_INGEST_YEAR)
        .with_source(filename);

    for line in content.lines().take(HEADER_SCAN_LINES) {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("Title:") {
            metadata.title = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Authors:") {
            metadata.authors = normalize_authors(value);
        } else if let Some(value) = line.strip_prefix("Journal:") {
            metadata.journal = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Year:") {
            if let Ok(year) = value.trim().parse() {
                metadata.year = Some(year);
            }
        } else if let Some(value) = line
            .strip_prefix("PubMed ID:")
            .or_else(|| line.strip_prefix("Document ID:"))
        {
            metadata.pubmed_id = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("URL:") {
            metadata.url = value.trim().to_string();
        }
    }

    metadata
}

/// Load one text file as a document with header metadata
pub async fn load_text_file(path: &Path) -> Result<ResearchDocument, DomainError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::ingestion(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let metadata = extract_metadata_from_content(&content, &filename);

    Ok(ResearchDocument::new(content, metadata))
}

/// Load every `*.txt` file in `dir`, sorted by file name.
///
/// A missing directory yields no documents.
pub async fn load_directory(dir: &Path) -> Result<Vec<ResearchDocument>, DomainError> {
    if !dir.is_dir() {
        warn!(path = %dir.display(), "Corpus directory not found");
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        DomainError::ingestion(format!("Failed to list {}: {}", dir.display(), e))
    })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DomainError::ingestion(format!("Failed to list {}: {}", dir.display(), e)))?
    {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let document = load_text_file(&path).await?;
        debug!(file = %path.display(), title = %document.metadata.title, "Loaded paper");
        documents.push(document);
    }

    Ok(documents)
}
