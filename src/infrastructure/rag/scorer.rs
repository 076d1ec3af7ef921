use tracing::info;

use crate::domain::rag::{calculate_confidence, ConfidenceLevel, Stage, WorkflowState};

/// Computes the bounded confidence score for the generated answer
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, state: &mut WorkflowState) {
        state.confidence = calculate_confidence(
            &state.sources,
            &state.answer,
            state.citation_indices.len(),
        );

        info!(
            stage = %Stage::Score,
            confidence = state.confidence,
            level = %ConfidenceLevel::from_score(state.confidence),
            sources = state.sources.len(),
            "Confidence scored"
        );
    }
}
