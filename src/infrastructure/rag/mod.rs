//! Retrieval-augmented answering pipeline: the five stages and their driver

mod engine;
mod filter;
mod generator;
mod retriever;
mod scorer;
mod validator;

pub use engine::WorkflowEngine;
pub use filter::QualityFilter;
pub use generator::AnswerGenerator;
pub use retriever::DocumentRetriever;
pub use scorer::ConfidenceScorer;
pub use validator::QueryValidator;
