//! Pipeline error types

use thiserror::Error;

use super::Stage;
use crate::domain::prompt::TemplateError;
use crate::domain::DomainError;

/// Errors that abort a pipeline run.
///
/// A safety rejection or an empty evidence set is not an error; both end in
/// a normal [`QueryResult`](super::QueryResult).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A language-model or vector-store call failed
    #[error("Collaborator failure during {stage}: {source}")]
    Collaborator {
        stage: Stage,
        #[source]
        source: DomainError,
    },

    #[error("Prompt rendering failed during {stage}: {source}")]
    Prompt {
        stage: Stage,
        #[source]
        source: TemplateError,
    },
}

impl PipelineError {
    pub fn collaborator(stage: Stage, source: DomainError) -> Self {
        Self::Collaborator { stage, source }
    }

    pub fn prompt(stage: Stage, source: TemplateError) -> Self {
        Self::Prompt { stage, source }
    }

    /// Stage that was running when the pipeline aborted
    pub fn stage(&self) -> Stage {
        match self {
            Self::Collaborator { stage, .. } | Self::Prompt { stage, .. } => *stage,
        }
    }
}
