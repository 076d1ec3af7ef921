//! Retrieval-augmented answering domain
//!
//! Pure, model-free pieces of the question-answering pipeline: the workflow
//! state threaded through the stages, the deterministic quality ranking,
//! citation extraction, the confidence heuristic and the fixed prompts.

mod citations;
mod config;
mod confidence;
mod context;
mod error;
mod prompts;
mod quality;
mod source;
mod state;
mod validation;

pub use citations::{
    align_citations_with_sources, extract_citations, format_citation, validate_citations,
    CitationAlignment,
};
pub use config::RagConfig;
pub use confidence::{calculate_confidence, explain_confidence, ConfidenceLevel, DEFAULT_RELEVANCE};
pub use context::build_context;
pub use error::PipelineError;
pub use prompts::{
    generation_prompt, validation_prompt, FALLBACK_PHRASE, INSUFFICIENT_EVIDENCE_ANSWER,
    REJECTION_WARNING, SYSTEM_PROMPT,
};
pub use quality::{rank_by_quality, DocumentQuality, MISSING_YEAR};
pub use source::{build_sources, SourceRecord, GENERATED_RELEVANCE_SCORE};
pub use state::{QueryResult, Stage, WorkflowState};
pub use validation::ValidationDecision;
