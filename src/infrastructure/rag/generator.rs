//! Grounded answer generation

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::rag::{
    align_citations_with_sources, build_context, build_sources, extract_citations,
    generation_prompt, validate_citations,
    PipelineError, RagConfig, Stage, WorkflowState, INSUFFICIENT_EVIDENCE_ANSWER, SYSTEM_PROMPT,
};
use crate::domain::{LlmProvider, LlmRequest};

#[derive(Debug, Clone)]
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    config: RagConfig,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, config: RagConfig) -> Self {
        Self { llm, config }
    }

    /// Produce `answer`, `sources` and `citation_indices`.
    ///
    /// With no documents the fixed insufficiency answer is returned and the
    /// model is not called.
    pub async fn apply(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        if state.documents.is_empty() {
            state.answer = INSUFFICIENT_EVIDENCE_ANSWER.to_string();
            state.sources.clear();
            state.citation_indices.clear();

            info!(stage = %Stage::Generate, documents = 0, "No evidence; skipping generation");
            return Ok(());
        }

        let values = HashMap::from([
            ("context".to_string(), build_context(&state.documents)),
            ("query".to_string(), state.query.clone()),
        ]);
        let prompt = generation_prompt()
            .render(&values)
            .map_err(|e| PipelineError::prompt(Stage::Generate, e))?;

        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .llm
            .chat(&self.config.model, request)
            .await
            .map_err(|e| PipelineError::collaborator(Stage::Generate, e))?;

        state.answer = response.content().to_string();
        state.citation_indices = extract_citations(&state.answer);
        state.sources = build_sources(&state.documents);

        // Out-of-range citations are reported but kept as-is
        let problems = validate_citations(&state.answer, state.sources.len());
        if !problems.is_empty() {
            warn!(stage = %Stage::Generate, problems = ?problems, "Answer cites unknown sources");
        }

        let alignment = align_citations_with_sources(&state.answer, &state.sources);
        debug!(
            stage = %Stage::Generate,
            cited_sources = alignment.cited_sources.len(),
            uncited_sources = state.sources.len().saturating_sub(alignment.cited_sources.len()),
            distinct_citations = alignment.unique_citation_count,
            "Citation coverage"
        );

        info!(
            stage = %Stage::Generate,
            documents = state.documents.len(),
            citations = state.citation_indices.len(),
            answer_chars = state.answer.len(),
            "Answer generated"
        );

        Ok(())
    }
}
