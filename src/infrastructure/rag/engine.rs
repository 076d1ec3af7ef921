//! Sequential pipeline driver
//!
//! Walks the [`Stage`] transitions for one request, dispatching each stage
//! in turn. There are no retries and no parallelism; the first fault ends the
//! run.

use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use super::{AnswerGenerator, ConfidenceScorer, DocumentRetriever, QualityFilter, QueryValidator};
use crate::domain::rag::{PipelineError, QueryResult, RagConfig, Stage, WorkflowState};
use crate::domain::research::VectorStore;
use crate::domain::LlmProvider;

#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    validator: QueryValidator,
    retriever: DocumentRetriever,
    filter: QualityFilter,
    generator: AnswerGenerator,
    scorer: ConfidenceScorer,
}

impl WorkflowEngine {
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn VectorStore>, config: RagConfig) -> Self {
        Self {
            validator: QueryValidator::new(Arc::clone(&llm), config.clone()),
            retriever: DocumentRetriever::new(store, config.retrieval_top_k),
            filter: QualityFilter::new(config.filter_top_k),
            generator: AnswerGenerator::new(llm, config),
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Run the pipeline for one query.
    ///
    /// A rejected query returns normally with `query_validated == false` and
    /// empty outputs. Collaborator failures are returned as errors.
    pub async fn run(
        &self,
        query: &str,
        include_guidelines: bool,
    ) -> Result<QueryResult, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("rag_pipeline", %request_id);

        self.execute(WorkflowState::new(query, include_guidelines))
            .instrument(span)
            .await
            .map(WorkflowState::into_result)
    }

    async fn execute(&self, mut state: WorkflowState) -> Result<WorkflowState, PipelineError> {
        let mut stage = Stage::Start;

        while stage != Stage::End {
            match stage {
                Stage::Start | Stage::End => {}
                Stage::Validate => self.validator.apply(&mut state).await?,
                Stage::Retrieve => self.retriever.apply(&mut state).await?,
                Stage::Filter => self.filter.apply(&mut state),
                Stage::Generate => self.generator.apply(&mut state).await?,
                Stage::Score => self.scorer.apply(&mut state),
            }
            stage = stage.next(&state);
        }

        info!(
            query_validated = state.query_validated,
            sources = state.sources.len(),
            confidence = state.confidence,
            "Pipeline finished"
        );

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::rag::{INSUFFICIENT_EVIDENCE_ANSWER, REJECTION_WARNING};
    use crate::domain::research::{DocumentMetadata, MockVectorStore, ResearchDocument};
    use crate::domain::DomainError;

    fn paper(title: &str, year: i32, pubmed_id: &str, content: &str) -> ResearchDocument {
        ResearchDocument::new(
            content,
            DocumentMetadata::default()
                .with_title(title)
                .with_year(year)
                .with_pubmed_id(pubmed_id),
        )
    }

    fn corpus() -> Vec<ResearchDocument> {
        vec![
            paper("Old cohort", 2009, "", "Sulfonylureas were common."),
            paper("Metformin RCT", 2021, "111", "Metformin lowers HbA1c."),
            paper("SGLT2 review", 2018, "222", "SGLT2 inhibitors cut HF admissions."),
        ]
    }

    fn store_returning(documents: Vec<ResearchDocument>) -> MockVectorStore {
        let mut store = MockVectorStore::new();
        store.expect_store_name().return_const("mock");
        store
            .expect_similarity_search()
            .times(1)
            .returning(move |_, _| Ok(documents.clone()));
        store
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let llm = Arc::new(
            MockLlmProvider::new("mock")
                .with_reply("APPROVED")
                .with_reply("Metformin is first-line [1]. SGLT2 inhibitors help [2][1]."),
        );
        let engine = WorkflowEngine::new(
            llm.clone(),
            Arc::new(store_returning(corpus())),
            RagConfig::default(),
        );

        let result = engine.run("How is type 2 diabetes treated?", true).await.unwrap();

        assert!(result.query_validated);
        assert!(result.warning.is_none());
        assert_eq!(result.citation_indices, vec![1, 2, 1]);
        let titles: Vec<_> = result.sources.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Metformin RCT", "SGLT2 review", "Old cohort"]);
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_query_skips_downstream_stages() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("REJECTED: personal dosage"));
        let mut store = MockVectorStore::new();
        store.expect_similarity_search().never();

        let engine = WorkflowEngine::new(llm.clone(), Arc::new(store), RagConfig::default());
        let result = engine.run("What dose of insulin should I take?", true).await.unwrap();

        assert!(!result.query_validated);
        assert_eq!(result.warning.as_deref(), Some(REJECTION_WARNING));
        assert!(result.answer.is_empty());
        assert!(result.sources.is_empty());
        assert!(result.citation_indices.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_evidence_end_to_end() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("APPROVED"));
        let engine = WorkflowEngine::new(
            llm.clone(),
            Arc::new(store_returning(Vec::new())),
            RagConfig::default(),
        );

        let result = engine.run("Research on an obscure condition", true).await.unwrap();

        assert!(result.query_validated);
        assert_eq!(result.answer, INSUFFICIENT_EVIDENCE_ANSWER);
        assert!(result.sources.is_empty());
        assert!(result.citation_indices.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_filter_truncates_before_generation() {
        let llm = Arc::new(
            MockLlmProvider::new("mock")
                .with_reply("APPROVED")
                .with_reply("Answer [1]"),
        );
        let engine = WorkflowEngine::new(
            llm,
            Arc::new(store_returning(corpus())),
            RagConfig::default().with_filter_top_k(1),
        );

        let result = engine.run("How is type 2 diabetes treated?", true).await.unwrap();

        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "Metformin RCT");
        // single source penalty applies
        assert!(result.confidence < 0.5);
    }

    #[tokio::test]
    async fn test_retrieval_fault_aborts() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("APPROVED"));
        let mut store = MockVectorStore::new();
        store
            .expect_similarity_search()
            .returning(|_, _| Err(DomainError::vector_store("connection refused")));

        let engine = WorkflowEngine::new(llm.clone(), Arc::new(store), RagConfig::default());
        let err = engine.run("How is type 2 diabetes treated?", true).await.unwrap_err();

        assert_eq!(err.stage(), Stage::Retrieve);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generation_fault_is_not_downgraded() {
        let llm = Arc::new(
            MockLlmProvider::new("mock")
                .with_reply("APPROVED")
                .with_error("overloaded"),
        );
        let engine = WorkflowEngine::new(
            llm,
            Arc::new(store_returning(corpus())),
            RagConfig::default(),
        );

        let err = engine.run("How is type 2 diabetes treated?", true).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Collaborator {
                stage: Stage::Generate,
                ..
            }
        ));
    }
}
