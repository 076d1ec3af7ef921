//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, EmbeddingProviderKind, EmbeddingSettings, LlmSettings, LogFormat,
    LoggingConfig, ServerConfig, VectorStoreSettings,
};
