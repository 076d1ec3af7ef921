//! Application state shared by every handler

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::cache::ResponseCache;
use crate::domain::DomainError;
use crate::infrastructure::cache::create_response_cache;
use crate::infrastructure::clients::ClientRegistry;
use crate::infrastructure::rag::WorkflowEngine;

#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<ClientRegistry>,
    pub cache: Arc<dyn ResponseCache>,
}

impl AppState {
    pub fn new(registry: Arc<ClientRegistry>, cache: Arc<dyn ResponseCache>) -> Self {
        Self { registry, cache }
    }

    /// State with lazily-built clients and the configured cache
    pub fn from_config(config: AppConfig) -> Self {
        let cache = create_response_cache(&config.cache);
        Self::new(Arc::new(ClientRegistry::new(config)), cache)
    }

    pub fn config(&self) -> &AppConfig {
        self.registry.config()
    }

    /// Engine over the shared clients, opening them on first use
    pub async fn engine(&self) -> Result<WorkflowEngine, DomainError> {
        let llm = self.registry.llm().await?;
        let store = self.registry.vector_store().await?;

        Ok(WorkflowEngine::new(llm, store, self.config().rag_config()))
    }
}
