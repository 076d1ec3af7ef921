//! Liveness and status endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::api::types::Json;

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub service: String,
}

/// Component status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub vectorstore_loaded: bool,
    pub llm_available: bool,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        service: "medical-research-rag".to_string(),
    })
}

/// GET /api/health
///
/// Always reports "operational"; a store that fails to open counts as not loaded.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "operational".to_string(),
        vectorstore_loaded: state.registry.vector_store_loaded().await,
        llm_available: state.registry.llm_available().await,
    })
}
