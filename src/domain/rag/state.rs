//! Per-request workflow state and stage transitions

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SourceRecord;
use crate::domain::research::ResearchDocument;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Start,
    Validate,
    Retrieve,
    Filter,
    Generate,
    Score,
    End,
}

impl Stage {
    /// Transition out of this stage given the state it produced.
    ///
    /// The only branch is after validation: a rejected query ends the run.
    pub fn next(self, state: &WorkflowState) -> Self {
        match self {
            Self::Start => Self::Validate,
            Self::Validate if state.query_validated => Self::Retrieve,
            Self::Validate => Self::End,
            Self::Retrieve => Self::Filter,
            Self::Filter => Self::Generate,
            Self::Generate => Self::Score,
            Self::Score | Self::End => Self::End,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Validate => "validate",
            Self::Retrieve => "retrieve",
            Self::Filter => "filter",
            Self::Generate => "generate",
            Self::Score => "score",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable record threaded through the stages of one request
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub query: String,
    pub include_guidelines: bool,
    /// Set by retrieval, replaced by filtering
    pub documents: Vec<ResearchDocument>,
    pub answer: String,
    pub confidence: f64,
    pub sources: Vec<SourceRecord>,
    pub query_validated: bool,
    pub warning: Option<String>,
    /// Raw `[n]` values from the answer, unvalidated
    pub citation_indices: Vec<u32>,
}

impl WorkflowState {
    pub fn new(query: impl Into<String>, include_guidelines: bool) -> Self {
        Self {
            query: query.into(),
            include_guidelines,
            ..Default::default()
        }
    }

    pub fn into_result(self) -> QueryResult {
        QueryResult {
            answer: self.answer,
            sources: self.sources,
            confidence: self.confidence,
            query_validated: self.query_validated,
            warning: self.warning,
            citation_indices: self.citation_indices,
        }
    }
}

/// Outcome of a completed pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<SourceRecord>,
    pub confidence: f64,
    pub query_validated: bool,
    pub warning: Option<String>,
    pub citation_indices: Vec<u32>,
}
