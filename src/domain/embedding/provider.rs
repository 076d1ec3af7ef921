//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for embedding models (OpenAI-compatible servers, local hashing, ...)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a batch of texts; the output has one vector per input, in order
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Dimensionality of produced vectors
    fn dimensions(&self) -> usize;
}
