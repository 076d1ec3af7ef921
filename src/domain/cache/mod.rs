//! Cache domain - answer caching abstraction

mod key;
mod repository;

pub use key::{cache_key, QUERY_KEY_PREFIX};
pub use repository::ResponseCache;
