//! Query and suggestion payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::rag::{QueryResult, SourceRecord};

fn default_include_guidelines() -> bool {
    true
}

/// POST /api/query body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 10, max = 500, message = "query must be 10 to 500 characters"))]
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default = "default_include_guidelines")]
    pub include_guidelines: bool,
}

/// POST /api/query response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    pub answer: String,
    pub sources: Vec<SourceRecord>,
    pub confidence: f64,
    pub processing_time_ms: f64,
    pub query_validated: bool,
    pub warning_message: Option<String>,
    pub citations_in_text: Vec<u32>,
}

impl RagResponse {
    pub fn from_result(result: QueryResult, processing_time_ms: f64) -> Self {
        Self {
            answer: result.answer,
            sources: result.sources,
            confidence: result.confidence,
            processing_time_ms,
            query_validated: result.query_validated,
            warning_message: result.warning,
            citations_in_text: result.citation_indices,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}
