//! Embedding provider implementations

mod hashing;
mod openai;

pub use hashing::HashingEmbeddingProvider;
pub use openai::{OpenAiEmbeddingProvider, DEFAULT_OPENAI_BASE_URL};
