//! Vector similarity store contract

use std::fmt::Debug;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::ResearchDocument;
use crate::domain::DomainError;

/// Similarity search over the research corpus.
///
/// `similarity_search` returns at most `k` documents in similarity-descending
/// order. An empty result is a valid answer; connectivity or index problems
/// are reported as errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the store implementation name
    fn store_name(&self) -> &'static str;

    /// Find the `k` documents most similar to `query`
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ResearchDocument>, DomainError>;

    /// Add documents (already chunked) to the store, returning how many were stored
    async fn add_documents(&self, documents: Vec<ResearchDocument>) -> Result<usize, DomainError>;

    /// Number of stored documents
    async fn document_count(&self) -> Result<usize, DomainError>;
}
