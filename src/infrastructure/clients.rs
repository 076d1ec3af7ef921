//! Process-wide collaborator clients
//!
//! The language model, embedding model and vector store clients are created
//! on first use, at most once, behind a lock, and shared read-only by every
//! request afterwards. `teardown` drops them so the next use rebuilds them.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::{AppConfig, EmbeddingProviderKind};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::research::VectorStore;
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::embedding::{
    HashingEmbeddingProvider, OpenAiEmbeddingProvider, DEFAULT_OPENAI_BASE_URL,
};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::ingestion::{IngestionService, TextSplitter};
use crate::infrastructure::llm::{AnthropicProvider, DEFAULT_ANTHROPIC_BASE_URL};
use crate::infrastructure::vector_store::InMemoryVectorStore;

/// Lock-guarded, initialize-once shared handle
#[derive(Debug)]
pub struct LazyHandle<T: ?Sized> {
    name: &'static str,
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> LazyHandle<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RwLock::new(None),
        }
    }

    /// Handle that starts out initialized
    pub fn ready(name: &'static str, value: Arc<T>) -> Self {
        Self {
            name,
            slot: RwLock::new(Some(value)),
        }
    }

    /// Return the shared value, running `init` if this is the first use.
    ///
    /// Once initialized, callers only take the read lock. The write lock is
    /// held across `init`, so concurrent first callers wait for a single
    /// initialization. A failed `init` leaves the handle empty.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<Arc<T>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>, DomainError>>,
    {
        {
            let slot = self.slot.read().await;
            if let Some(value) = slot.as_ref() {
                return Ok(Arc::clone(value));
            }
        }

        let mut slot = self.slot.write().await;

        // Another caller may have finished init while we waited
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        let value = init().await?;
        info!(client = self.name, "Client initialized");
        *slot = Some(Arc::clone(&value));

        Ok(value)
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Drop the shared value; returns whether one was held
    pub async fn teardown(&self) -> bool {
        let dropped = self.slot.write().await.take().is_some();
        if dropped {
            info!(client = self.name, "Client torn down");
        }
        dropped
    }
}

/// Owner of the lazily-created collaborator clients
#[derive(Debug)]
pub struct ClientRegistry {
    config: AppConfig,
    llm: LazyHandle<dyn LlmProvider>,
    embedder: LazyHandle<dyn EmbeddingProvider>,
    vector_store: LazyHandle<dyn VectorStore>,
}

impl ClientRegistry {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            llm: LazyHandle::new("llm"),
            embedder: LazyHandle::new("embedding"),
            vector_store: LazyHandle::new("vector_store"),
        }
    }

    /// Registry with ready-made language model and vector store clients
    pub fn with_clients(
        config: AppConfig,
        llm: Arc<dyn LlmProvider>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            config,
            llm: LazyHandle::ready("llm", llm),
            embedder: LazyHandle::new("embedding"),
            vector_store: LazyHandle::ready("vector_store", vector_store),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn llm(&self) -> Result<Arc<dyn LlmProvider>, DomainError> {
        self.llm.get_or_try_init(|| self.build_llm()).await
    }

    pub async fn embedder(&self) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        self.embedder.get_or_try_init(|| self.build_embedder()).await
    }

    /// Vector store, ingesting the configured corpus on first open
    pub async fn vector_store(&self) -> Result<Arc<dyn VectorStore>, DomainError> {
        self.vector_store
            .get_or_try_init(|| self.build_vector_store())
            .await
    }

    pub async fn ingestion_service(&self) -> Result<IngestionService, DomainError> {
        let store = self.vector_store().await?;
        Ok(IngestionService::new(store, self.splitter()?))
    }

    /// Whether the store opens and holds at least one chunk
    pub async fn vector_store_loaded(&self) -> bool {
        match self.vector_store().await {
            Ok(store) => store.document_count().await.map(|n| n > 0).unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "Vector store unavailable");
                false
            }
        }
    }

    /// Whether a language model client exists or can be built
    pub async fn llm_available(&self) -> bool {
        self.config.llm.api_key.is_some() || self.llm.is_initialized().await
    }

    /// Drop every client; the next use rebuilds them
    pub async fn teardown(&self) {
        self.llm.teardown().await;
        self.vector_store.teardown().await;
        self.embedder.teardown().await;
    }

    async fn build_llm(&self) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let settings = &self.config.llm;
        let api_key = settings.api_key.clone().ok_or_else(|| {
            DomainError::configuration(
                "Anthropic API key missing: set APP__LLM__API_KEY or ANTHROPIC_API_KEY",
            )
        })?;

        let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        let base_url = settings
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_ANTHROPIC_BASE_URL);

        Ok(Arc::new(AnthropicProvider::with_base_url(
            client, api_key, base_url,
        )))
    }

    async fn build_embedder(&self) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let settings = &self.config.embedding;

        match settings.provider {
            EmbeddingProviderKind::Hashing => {
                Ok(Arc::new(HashingEmbeddingProvider::new(settings.dimensions)?))
            }
            EmbeddingProviderKind::OpenAi => {
                let client =
                    HttpClient::with_timeout(Duration::from_secs(self.config.llm.timeout_secs))?;

                Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
                    client,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    settings.dimensions,
                    settings
                        .base_url
                        .as_deref()
                        .unwrap_or(DEFAULT_OPENAI_BASE_URL),
                )))
            }
        }
    }

    async fn build_vector_store(&self) -> Result<Arc<dyn VectorStore>, DomainError> {
        let settings = &self.config.vector_store;
        let embedder = self.embedder().await?;
        let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new(
            settings.collection_name.clone(),
            embedder,
        ));

        match &settings.corpus_dir {
            Some(dir) => {
                let service = IngestionService::new(Arc::clone(&store), self.splitter()?);
                service.ingest_directory(dir).await?;
            }
            None => warn!("No corpus directory configured; vector store starts empty"),
        }

        Ok(store)
    }

    fn splitter(&self) -> Result<TextSplitter, DomainError> {
        let settings = &self.config.vector_store;
        TextSplitter::new(settings.chunk_size, settings.chunk_overlap)
    }
}
