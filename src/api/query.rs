//! Question answering endpoints

use std::time::Instant;

use axum::extract::{Query, State};
use tracing::{debug, error, info, warn};
use validator::Validate;

use super::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest, RagResponse, SuggestParams, SuggestResponse};
use crate::domain::cache::cache_key;

const SUGGESTIONS: [&str; 3] = [
    "What are current treatments for Type 2 Diabetes?",
    "Compare Metformin vs Insulin efficacy",
    "Latest research on Alzheimer's biomarkers",
];

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// POST /api/query
pub async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<RagResponse>, ApiError> {
    request.validate()?;

    let start = Instant::now();
    info!(
        session_id = request.session_id.as_deref().unwrap_or("-"),
        include_guidelines = request.include_guidelines,
        "Processing research query"
    );

    let cache_enabled = state.config().cache.enabled;
    let key = cache_key(&request.query);

    if cache_enabled {
        match state.cache.get(&key).await {
            Ok(Some(hit)) => {
                debug!(key = %key, "Answer served from cache");
                return Ok(Json(RagResponse::from_result(hit, elapsed_ms(start))));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache lookup failed"),
        }
    }

    let engine = state.engine().await.map_err(|e| {
        error!(error = %e, "RAG pipeline error");
        ApiError::rag_failed()
    })?;

    let result = engine
        .run(&request.query, request.include_guidelines)
        .await
        .map_err(|e| {
            error!(error = %e, stage = %e.stage(), "RAG pipeline error");
            ApiError::rag_failed()
        })?;

    if cache_enabled && result.query_validated {
        if let Err(e) = state.cache.put(&key, &result).await {
            warn!(error = %e, "Failed to cache answer");
        }
    }

    Ok(Json(RagResponse::from_result(result, elapsed_ms(start))))
}

/// POST /api/suggest
///
/// The prefix is accepted but the suggestions are fixed.
pub async fn suggest(Query(params): Query<SuggestParams>) -> Json<SuggestResponse> {
    debug!(prefix = %params.prefix, "Suggestions requested");

    Json(SuggestResponse {
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    })
}
