//! In-memory answer cache using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::ResponseCache;
use crate::domain::rag::QueryResult;
use crate::domain::DomainError;

/// Configuration for the in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Entries older than this are evicted
    pub ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Thread-safe answer cache.
///
/// Results are stored as serialized JSON so a cached answer is a snapshot,
/// independent of later mutations by the caller.
#[derive(Debug)]
pub struct InMemoryResponseCache {
    cache: MokaCache<String, String>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();

        Self { cache }
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, key: &str) -> Result<Option<QueryResult>, DomainError> {
        match self.cache.get(key).await {
            Some(data) => {
                let result = serde_json::from_str(&data).map_err(|e| {
                    DomainError::cache(format!("Failed to deserialize cache value: {}", e))
                })?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, result: &QueryResult) -> Result<(), DomainError> {
        let data = serde_json::to_string(result)
            .map_err(|e| DomainError::cache(format!("Failed to serialize cache value: {}", e)))?;

        self.cache.insert(key.to_string(), data).await;
        Ok(())
    }

    fn cache_name(&self) -> &'static str {
        "in_memory"
    }
}
