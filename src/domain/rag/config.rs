//! Pipeline tuning parameters

use serde::{Deserialize, Serialize};

/// Configuration for the answering pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Number of candidates requested from the vector store
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: usize,
    /// Number of documents kept after quality ranking
    #[serde(default = "default_filter_top_k")]
    pub filter_top_k: usize,
    /// Model used for validation and generation
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_retrieval_top_k() -> usize {
    8
}

fn default_filter_top_k() -> usize {
    5
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            retrieval_top_k: default_retrieval_top_k(),
            filter_top_k: default_filter_top_k(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

impl RagConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retrieval_top_k(mut self, k: usize) -> Self {
        self.retrieval_top_k = k;
        self
    }

    pub fn with_filter_top_k(mut self, n: usize) -> Self {
        self.filter_top_k = n;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RagConfig::default();

        assert_eq!(config.retrieval_top_k, 8);
        assert_eq!(config.filter_top_k, 5);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RagConfig::new()
            .with_retrieval_top_k(12)
            .with_filter_top_k(3)
            .with_model("claude-3-5-haiku-20241022")
            .with_temperature(1.7);

        assert_eq!(config.retrieval_top_k, 12);
        assert_eq!(config.filter_top_k, 3);
        assert_eq!(config.model, "claude-3-5-haiku-20241022");
        assert_eq!(config.temperature, 1.0);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RagConfig = serde_json::from_str(r#"{"filter_top_k": 2}"#).unwrap();

        assert_eq!(config.filter_top_k, 2);
        assert_eq!(config.retrieval_top_k, 8);
    }
}
