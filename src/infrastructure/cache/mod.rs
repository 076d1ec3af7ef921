//! Cache infrastructure - answer cache implementations

mod in_memory;
mod noop;

use std::sync::Arc;
use std::time::Duration;

pub use in_memory::{InMemoryCacheConfig, InMemoryResponseCache};
pub use noop::NoopResponseCache;

use crate::config::CacheSettings;
use crate::domain::cache::ResponseCache;

/// Select the cache implementation for the given settings
pub fn create_response_cache(settings: &CacheSettings) -> Arc<dyn ResponseCache> {
    if !settings.enabled {
        return Arc::new(NoopResponseCache);
    }

    let config = InMemoryCacheConfig::default()
        .with_max_capacity(settings.max_capacity)
        .with_ttl(Duration::from_secs(settings.ttl_secs));

    Arc::new(InMemoryResponseCache::with_config(config))
}
