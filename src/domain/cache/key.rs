//! Cache key derivation

use sha2::{Digest, Sha256};

/// Namespace shared by every answer-cache entry
pub const QUERY_KEY_PREFIX: &str = "rag_query";

/// Key for a query's cached answer: `rag_query:<sha256 hex>`
pub fn cache_key(query: &str) -> String {
    let digest = Sha256::digest(query.as_bytes());
    format!("{}:{}", QUERY_KEY_PREFIX, hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let key = cache_key("What are treatments for gout?");

        assert!(key.starts_with("rag_query:"));
        assert_eq!(key.len(), "rag_query:".len() + 64);
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        assert_eq!(cache_key("a"), cache_key("a"));
        assert_ne!(cache_key("a"), cache_key("b"));
    }

    #[test]
    fn test_cache_key_known_digest() {
        assert_eq!(
            cache_key(""),
            "rag_query:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
