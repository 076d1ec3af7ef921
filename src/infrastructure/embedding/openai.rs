//! OpenAI-compatible embedding provider
//!
//! Works against api.openai.com and against self-hosted servers exposing the
//! same `/v1/embeddings` endpoint (e.g. a text-embeddings-inference instance
//! serving a sentence-transformers model).

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-compatible embedding provider
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(
        client: C,
        api_key: Option<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self::with_base_url(client, api_key, model, dimensions, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        model: impl Into<String>,
        dimensions: usize,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header: api_key.map(|key| format!("Bearer {}", key)),
            base_url,
            model: model.into(),
            dimensions,
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(auth) = &self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.data.len() != expected {
            return Err(DomainError::provider(
                "openai",
                format!(
                    "Expected {} embeddings, received {}",
                    expected,
                    response.data.len()
                ),
            ));
        }

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let expected = texts.len();
        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await?;

        self.parse_response(response, expected)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// OpenAI API types for embeddings

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const LOCAL_URL: &str = "http://localhost:8081/v1/embeddings";

    fn provider(client: MockHttpClient) -> OpenAiEmbeddingProvider<MockHttpClient> {
        OpenAiEmbeddingProvider::with_base_url(
            client,
            None,
            "sentence-transformers/all-MiniLM-L6-v2",
            3,
            "http://localhost:8081",
        )
    }

    #[tokio::test]
    async fn test_embed_orders_by_index() {
        let client = MockHttpClient::new().with_response(
            LOCAL_URL,
            serde_json::json!({
                "object": "list",
                "model": "sentence-transformers/all-MiniLM-L6-v2",
                "data": [
                    {"object": "embedding", "index": 1, "embedding": [0.0, 1.0, 0.0]},
                    {"object": "embedding", "index": 0, "embedding": [1.0, 0.0, 0.0]}
                ]
            }),
        );
        let provider = provider(client);

        let vectors = provider
            .embed(vec!["first".into(), "second".into()])
            .await
            .unwrap();

        assert_eq!(vectors, vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        assert_eq!(
            provider.client.bodies()[0]["model"],
            "sentence-transformers/all-MiniLM-L6-v2"
        );
    }

    #[tokio::test]
    async fn test_embed_count_mismatch() {
        let client = MockHttpClient::new().with_response(
            LOCAL_URL,
            serde_json::json!({"data": [{"index": 0, "embedding": [1.0, 0.0, 0.0]}]}),
        );

        let result = provider(client).embed(vec!["a".into(), "b".into()]).await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_embed_empty_input_skips_request() {
        let provider = provider(MockHttpClient::new());

        assert!(provider.embed(Vec::new()).await.unwrap().is_empty());
        assert!(provider.client.bodies().is_empty());
    }

    #[test]
    fn test_headers_include_bearer_when_keyed() {
        let provider = OpenAiEmbeddingProvider::new(
            MockHttpClient::new(),
            Some("sk-test".into()),
            "text-embedding-3-small",
            1536,
        );

        assert!(provider.headers().contains(&("Authorization", "Bearer sk-test")));
    }
}
