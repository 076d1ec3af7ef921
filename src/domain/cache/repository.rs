//! Answer cache trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::rag::QueryResult;
use crate::domain::DomainError;

/// Cache of completed pipeline results, keyed by [`cache_key`](super::cache_key)
#[async_trait]
pub trait ResponseCache: Send + Sync + Debug {
    async fn get(&self, key: &str) -> Result<Option<QueryResult>, DomainError>;

    async fn put(&self, key: &str, result: &QueryResult) -> Result<(), DomainError>;

    fn cache_name(&self) -> &'static str;
}
