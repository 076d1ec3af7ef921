//! Deterministic token-hashing embeddings
//!
//! Each lowercase alphanumeric token is hashed into one of `dimensions`
//! buckets with a signed weight, and the result is L2-normalized. Texts that
//! share vocabulary land close together, which is enough for offline use and
//! tests without a model server.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Embedding dimensions must be greater than zero",
            ));
        }
        Ok(Self { dimensions })
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let tokens = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        for token in tokens {
            let digest = Sha256::digest(token.as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::cosine_similarity;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            HashingEmbeddingProvider::new(0),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_embeddings_are_deterministic_and_normalized() {
        let provider = HashingEmbeddingProvider::new(384).unwrap();
        let vectors = provider
            .embed(vec!["Metformin in type 2 diabetes".into(), "Metformin in type 2 diabetes".into()])
            .await
            .unwrap();

        assert_eq!(vectors[0], vectors[1]);
        assert_eq!(vectors[0].len(), 384);
        let norm: f32 = vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_scores_higher() {
        let provider = HashingEmbeddingProvider::new(384).unwrap();
        let vectors = provider
            .embed(vec![
                "metformin diabetes glucose".into(),
                "Metformin lowers glucose in diabetes".into(),
                "influenza vaccine efficacy".into(),
            ])
            .await
            .unwrap();

        let related = cosine_similarity(&vectors[0], &vectors[1]);
        let unrelated = cosine_similarity(&vectors[0], &vectors[2]);
        assert!(related > unrelated);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8).unwrap();
        let vectors = provider.embed(vec!["  ...  ".into()]).await.unwrap();

        assert!(vectors[0].iter().all(|v| *v == 0.0));
    }
}
