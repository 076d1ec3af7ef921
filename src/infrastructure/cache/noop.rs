use async_trait::async_trait;

use crate::domain::cache::ResponseCache;
use crate::domain::rag::QueryResult;
use crate::domain::DomainError;

/// Cache that never stores anything; the default when caching is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResponseCache;

#[async_trait]
impl ResponseCache for NoopResponseCache {
    async fn get(&self, _key: &str) -> Result<Option<QueryResult>, DomainError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _result: &QueryResult) -> Result<(), DomainError> {
        Ok(())
    }

    fn cache_name(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_always_misses() {
        let cache = NoopResponseCache;
        let result = QueryResult {
            answer: "a".into(),
            sources: Vec::new(),
            confidence: 0.5,
            query_validated: true,
            warning: None,
            citation_indices: Vec::new(),
        };

        cache.put("k", &result).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }
}
