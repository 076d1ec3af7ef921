//! In-memory vector store backed by an embedding provider

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::embedding::{cosine_similarity, EmbeddingProvider};
use crate::domain::research::{ResearchDocument, VectorStore};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct StoredDoc {
    document: ResearchDocument,
    embedding: Vec<f32>,
}

/// Brute-force cosine search over embedded chunks.
///
/// Results are ordered by descending similarity; equal scores keep insertion
/// order. Nothing is persisted.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    collection: String,
    embedder: Arc<dyn EmbeddingProvider>,
    documents: RwLock<Vec<StoredDoc>>,
}

impl InMemoryVectorStore {
    pub fn new(collection: impl Into<String>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            collection: collection.into(),
            embedder,
            documents: RwLock::new(Vec::new()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_name(&self) -> &'static str {
        "in_memory"
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ResearchDocument>, DomainError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(vec![query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::vector_store("Embedding provider returned no vector"))?;

        let docs = self.documents.read().await;

        let mut scored: Vec<(f32, &StoredDoc)> = docs
            .iter()
            .map(|doc| (cosine_similarity(&query_embedding, &doc.embedding), doc))
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let results: Vec<ResearchDocument> = scored
            .into_iter()
            .take(k)
            .map(|(score, doc)| doc.document.clone().with_similarity(score))
            .collect();

        debug!(
            collection = %self.collection,
            candidates = docs.len(),
            returned = results.len(),
            "Similarity search completed"
        );

        Ok(results)
    }

    async fn add_documents(&self, documents: Vec<ResearchDocument>) -> Result<usize, DomainError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let texts = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self
            .embedder
            .embed(texts)
            .await
            .map_err(|e| DomainError::vector_store(format!("Failed to embed documents: {}", e)))?;

        if embeddings.len() != documents.len() {
            return Err(DomainError::vector_store(format!(
                "Expected {} embeddings, received {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let count = documents.len();
        let mut docs = self.documents.write().await;
        docs.extend(
            documents
                .into_iter()
                .zip(embeddings)
                .map(|(document, embedding)| StoredDoc {
                    document,
                    embedding,
                }),
        );

        Ok(count)
    }

    async fn document_count(&self) -> Result<usize, DomainError> {
        Ok(self.documents.read().await.len())
    }
}
