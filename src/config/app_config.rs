use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::rag::RagConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmSettings,
    pub embedding: EmbeddingSettings,
    pub vector_store: VectorStoreSettings,
    pub rag: RagConfig,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Anthropic language-model settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Local token hashing, no network
    #[default]
    Hashing,
    /// OpenAI-compatible `/v1/embeddings` endpoint
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub dimensions: usize,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    pub collection_name: String,
    /// Directory of `*.txt` papers ingested when the store is first opened
    pub corpus_dir: Option<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// Answer cache settings; disabled unless switched on
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.0,
            max_tokens: 4096,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            collection_name: "medical_research".to_string(),
            corpus_dir: None,
            chunk_size: 400,
            chunk_overlap: 80,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 3600,
            max_capacity: 10_000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;

        if app_config.llm.api_key.is_none() {
            app_config.llm.api_key = std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty());
        }

        Ok(app_config)
    }

    /// Pipeline settings with the model parameters taken from the `llm` section
    pub fn rag_config(&self) -> RagConfig {
        self.rag
            .clone()
            .with_model(self.llm.model.clone())
            .with_temperature(self.llm.temperature)
            .with_max_tokens(self.llm.max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.embedding.dimensions, 384);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
        assert_eq!(config.vector_store.collection_name, "medical_research");
        assert_eq!(config.rag.retrieval_top_k, 8);
        assert_eq!(config.rag.filter_top_k, 5);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_partial_sections_deserialize() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": {"port": 9000},
            "rag": {"filter_top_k": 3},
            "embedding": {"provider": "openai", "base_url": "http://localhost:8081"}
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rag.filter_top_k, 3);
        assert_eq!(config.rag.retrieval_top_k, 8);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::OpenAi);
    }

    #[test]
    fn test_rag_config_takes_llm_settings() {
        let mut config = AppConfig::default();
        config.llm.model = "claude-3-5-haiku-20241022".to_string();
        config.llm.max_tokens = 1024;

        let rag = config.rag_config();
        assert_eq!(rag.model, "claude-3-5-haiku-20241022");
        assert_eq!(rag.max_tokens, 1024);
        assert_eq!(rag.filter_top_k, 5);
    }
}
