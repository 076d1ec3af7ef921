//! Ask command - one-shot pipeline run from the terminal

use std::fmt::Write as _;

use anyhow::{anyhow, Context};
use clap::Args;
use validator::Validate;

use crate::api::types::QueryRequest;
use crate::config::AppConfig;
use crate::domain::rag::{explain_confidence, format_citation, QueryResult};
use crate::infrastructure::clients::ClientRegistry;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::rag::WorkflowEngine;

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Research question
    pub query: String,

    /// Leave clinical guidelines out of the run
    #[arg(long)]
    pub no_guidelines: bool,

    /// Print a reference list and confidence explanation after the JSON result
    #[arg(long)]
    pub explain: bool,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let registry = ClientRegistry::new(config);
    let result = answer(&registry, &args).await;
    registry.teardown().await;

    print!("{}", render(&result?, args.explain)?);
    Ok(())
}

/// Run the pipeline over the registry's clients.
///
/// The query is held to the same length rule as `POST /api/query`.
pub async fn answer(registry: &ClientRegistry, args: &AskArgs) -> anyhow::Result<QueryResult> {
    let request = QueryRequest {
        query: args.query.clone(),
        session_id: None,
        include_guidelines: !args.no_guidelines,
    };
    request
        .validate()
        .map_err(|e| anyhow!("Invalid query: {}", e))?;

    let llm = registry.llm().await.context("language model unavailable")?;
    let store = registry
        .vector_store()
        .await
        .context("vector store unavailable")?;

    let engine = WorkflowEngine::new(llm, store, registry.config().rag_config());
    let result = engine
        .run(&request.query, request.include_guidelines)
        .await
        .context("RAG processing failed")?;

    Ok(result)
}

/// Pretty JSON, optionally followed by references and the confidence explanation
pub fn render(result: &QueryResult, explain: bool) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(result)?;
    out.push('\n');

    if explain && result.query_validated {
        if !result.sources.is_empty() {
            out.push_str("\nReferences:\n");
            for (i, source) in result.sources.iter().enumerate() {
                writeln!(out, "{}", format_citation(source, i + 1))?;
            }
        }
        writeln!(
            out,
            "\n{}",
            explain_confidence(result.confidence, result.sources.len())
        )?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::research::{Authors, DocumentMetadata, MockVectorStore, ResearchDocument};

    fn args(query: &str) -> AskArgs {
        AskArgs {
            query: query.to_string(),
            no_guidelines: false,
            explain: true,
        }
    }

    fn registry(llm: MockLlmProvider) -> ClientRegistry {
        let mut store = MockVectorStore::new();
        store.expect_store_name().return_const("mock");
        store.expect_similarity_search().returning(|_, _| {
            Ok(vec![ResearchDocument::new(
                "Donepezil modestly improves cognition.",
                DocumentMetadata::default()
                    .with_title("Cholinesterase inhibitors")
                    .with_authors(Authors::List(vec!["Lee".into(), "Kim".into()]))
                    .with_journal("Lancet Neurology")
                    .with_year(2020),
            )])
        });

        ClientRegistry::with_clients(AppConfig::default(), Arc::new(llm), Arc::new(store))
    }

    #[tokio::test]
    async fn test_answer_and_render_references() {
        let llm = MockLlmProvider::new("mock")
            .with_reply("APPROVED")
            .with_reply("Donepezil gives modest benefit [1].");

        let result = answer(&registry(llm), &args("Alzheimer's drug efficacy")).await.unwrap();
        let output = render(&result, true).unwrap();

        assert!(output.contains("\"query_validated\": true"));
        assert!(output.contains("[1] Lee, Kim. Cholinesterase inhibitors. Lancet Neurology, 2020."));
        assert!(output.contains("confidence"));
    }

    #[tokio::test]
    async fn test_rejected_query_renders_json_only() {
        let llm = MockLlmProvider::new("mock").with_reply("REJECTED");

        let result = answer(&registry(llm), &args("Should I stop my meds?")).await.unwrap();
        let output = render(&result, true).unwrap();

        assert!(!result.query_validated);
        assert!(!output.contains("References:"));
    }

    #[tokio::test]
    async fn test_query_length_checked_before_pipeline() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_fallback("APPROVED"));
        let mut store = MockVectorStore::new();
        store.expect_similarity_search().never();
        let registry =
            ClientRegistry::with_clients(AppConfig::default(), llm.clone(), Arc::new(store));

        let short = answer(&registry, &args("statins")).await.unwrap_err();
        let long = answer(&registry, &args(&"x".repeat(501))).await.unwrap_err();

        assert!(short.to_string().starts_with("Invalid query"));
        assert!(long.to_string().starts_with("Invalid query"));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_error() {
        let llm = MockLlmProvider::new("mock").with_error("overloaded");

        let err = answer(&registry(llm), &args("Statin adverse effects")).await.unwrap_err();
        assert_eq!(err.to_string(), "RAG processing failed");
    }
}
