//! Deterministic, model-free document ranking

use serde::{Deserialize, Serialize};

use crate::domain::research::ResearchDocument;

/// Year assumed when a document carries none
pub const MISSING_YEAR: i32 = 2000;

/// Quality breakdown for a single document.
///
/// Components are held in tenths so that ties compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentQuality {
    recency_tenths: u8,
    identifier_tenths: u8,
}

impl DocumentQuality {
    pub fn of(document: &ResearchDocument) -> Self {
        let year = document.metadata.year.unwrap_or(MISSING_YEAR);
        let recency_tenths = if year >= 2020 {
            5
        } else if year >= 2015 {
            3
        } else {
            1
        };
        let identifier_tenths = if document.metadata.has_pubmed_id() { 5 } else { 3 };

        Self {
            recency_tenths,
            identifier_tenths,
        }
    }

    pub fn recency(&self) -> f64 {
        f64::from(self.recency_tenths) / 10.0
    }

    pub fn identifier(&self) -> f64 {
        f64::from(self.identifier_tenths) / 10.0
    }

    fn total_tenths(&self) -> u8 {
        self.recency_tenths + self.identifier_tenths
    }

    /// Combined score: one of 0.4, 0.6, 0.8 or 1.0
    pub fn score(&self) -> f64 {
        f64::from(self.total_tenths()) / 10.0
    }
}

/// Rank documents by quality and keep the best `top_n`.
///
/// The sort is stable: documents of equal quality keep their retrieval order.
pub fn rank_by_quality(documents: Vec<ResearchDocument>, top_n: usize) -> Vec<ResearchDocument> {
    let mut scored: Vec<(u8, ResearchDocument)> = documents
        .into_iter()
        .map(|doc| (DocumentQuality::of(&doc).total_tenths(), doc))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(top_n);
    scored.into_iter().map(|(_, doc)| doc).collect()
}
