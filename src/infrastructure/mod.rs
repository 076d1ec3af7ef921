//! Infrastructure layer - collaborator implementations and the answering pipeline

pub mod cache;
pub mod clients;
pub mod embedding;
pub mod http_client;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod vector_store;
