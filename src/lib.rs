//! Medical research RAG service
//!
//! Answers research questions from a corpus of medical papers:
//! - safety screening of the question by a language model
//! - vector retrieval and quality ranking of evidence
//! - grounded, citation-bearing answer generation
//! - a confidence score for every answer

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
