//! Domain layer - research documents, the RAG pipeline model and collaborator traits

pub mod cache;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod rag;
pub mod research;

pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
