use std::sync::Arc;

use tracing::info;

use crate::domain::rag::{PipelineError, Stage, WorkflowState};
use crate::domain::research::VectorStore;

/// One similarity query against the vector store
#[derive(Debug, Clone)]
pub struct DocumentRetriever {
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl DocumentRetriever {
    pub fn new(store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self { store, top_k }
    }

    /// Store the top-k candidates in the store's order, unmodified
    pub async fn apply(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let documents = self
            .store
            .similarity_search(&state.query, self.top_k)
            .await
            .map_err(|e| PipelineError::collaborator(Stage::Retrieve, e))?;

        info!(
            stage = %Stage::Retrieve,
            store = self.store.store_name(),
            top_k = self.top_k,
            documents = documents.len(),
            "Documents retrieved"
        );

        state.documents = documents;
        Ok(())
    }
}
