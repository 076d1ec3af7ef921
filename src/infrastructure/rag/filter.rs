use tracing::info;

use crate::domain::rag::{rank_by_quality, Stage, WorkflowState};

/// Model-free ranking by recency and identifier presence
#[derive(Debug, Clone, Copy)]
pub struct QualityFilter {
    top_n: usize,
}

impl QualityFilter {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Replace the candidates with the best `top_n`, ties in retrieval order
    pub fn apply(&self, state: &mut WorkflowState) {
        let candidates = std::mem::take(&mut state.documents);
        let retrieved = candidates.len();

        state.documents = rank_by_quality(candidates, self.top_n);

        info!(
            stage = %Stage::Filter,
            retrieved,
            documents = state.documents.len(),
            "Documents filtered"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::research::{DocumentMetadata, ResearchDocument};

    #[test]
    fn test_filter_replaces_documents() {
        let mut state = WorkflowState::new("q", true);
        state.documents = (0..7)
            .map(|i| {
                let metadata = DocumentMetadata::default()
                    .with_title(format!("d{i}"))
                    .with_year(2010 + i * 2);
                ResearchDocument::new("text", metadata)
            })
            .collect();

        QualityFilter::new(5).apply(&mut state);

        let titles: Vec<_> = state.documents.iter().map(|d| d.metadata.title.as_str()).collect();
        // 2020 and 2022 rank first, then 2016 and 2018, then 2010 (retrieval order)
        assert_eq!(titles, vec!["d5", "d6", "d3", "d4", "d0"]);
    }

    #[test]
    fn test_filter_empty() {
        let mut state = WorkflowState::new("q", true);
        QualityFilter::new(5).apply(&mut state);
        assert!(state.documents.is_empty());
    }
}
