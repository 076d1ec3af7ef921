//! Research corpus domain - documents and the vector similarity store contract

mod document;
mod vector_store;

pub use document::{normalize_authors, Authors, DocumentMetadata, ResearchDocument};
pub use vector_store::VectorStore;

#[cfg(test)]
pub use vector_store::MockVectorStore;
