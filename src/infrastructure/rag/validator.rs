//! Safety gate in front of retrieval

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::rag::{
    validation_prompt, PipelineError, RagConfig, Stage, ValidationDecision, WorkflowState,
    REJECTION_WARNING,
};
use crate::domain::{LlmProvider, LlmRequest};

/// Asks the language model to approve or reject the query
#[derive(Debug, Clone)]
pub struct QueryValidator {
    llm: Arc<dyn LlmProvider>,
    config: RagConfig,
}

impl QueryValidator {
    pub fn new(llm: Arc<dyn LlmProvider>, config: RagConfig) -> Self {
        Self { llm, config }
    }

    /// Set `query_validated`, and `warning` on rejection.
    ///
    /// A failed model call is a pipeline fault, never a rejection.
    pub async fn apply(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let values = HashMap::from([("query".to_string(), state.query.clone())]);
        let prompt = validation_prompt()
            .render(&values)
            .map_err(|e| PipelineError::prompt(Stage::Validate, e))?;

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .llm
            .chat(&self.config.model, request)
            .await
            .map_err(|e| PipelineError::collaborator(Stage::Validate, e))?;

        let decision = ValidationDecision::from_reply(response.content());
        state.query_validated = decision.is_approved();

        if state.query_validated {
            info!(stage = %Stage::Validate, query_validated = true, "Query approved");
        } else {
            state.warning = Some(REJECTION_WARNING.to_string());
            warn!(
                stage = %Stage::Validate,
                query_validated = false,
                reply = %response.content(),
                "Query rejected"
            );
        }

        Ok(())
    }
}
