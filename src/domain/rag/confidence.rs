//! Confidence heuristic for generated answers

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SourceRecord;

/// Relevance assumed for a source record that carries none
pub const DEFAULT_RELEVANCE: f64 = 0.8;

/// Score an answer from its sources, text and citation count.
///
/// The additive components are summed first; the insufficiency cap and the
/// single-source penalty are then applied in that order.
pub fn calculate_confidence(sources: &[SourceRecord], answer: &str, citation_count: usize) -> f64 {
    if sources.is_empty() || answer.is_empty() {
        return 0.0;
    }

    let source_count = sources.len() as f64;
    let source_score = f64::min(0.5, (source_count / 10.0) * 0.5);

    let avg_relevance = sources
        .iter()
        .map(|s| s.relevance_score.unwrap_or(DEFAULT_RELEVANCE))
        .sum::<f64>()
        / source_count;
    let relevance_score = avg_relevance * 0.3;

    let words = answer.split_whitespace().count() as f64;
    let citation_density = citation_count as f64 / f64::max(1.0, words / 50.0);
    let citation_score = f64::min(0.2, citation_density * 0.1);

    let mut confidence = source_score + relevance_score + citation_score;

    if answer.to_lowercase().contains("insufficient") {
        confidence = f64::min(confidence, 0.2);
    }
    if sources.len() < 2 {
        confidence *= 0.6;
    }

    confidence.clamp(0.0, 1.0)
}

/// Human-readable confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

pub fn explain_confidence(confidence: f64, source_count: usize) -> String {
    match ConfidenceLevel::from_score(confidence) {
        ConfidenceLevel::High => format!(
            "High confidence based on {source_count} high-quality sources with consistent findings."
        ),
        ConfidenceLevel::Medium => format!(
            "Moderate confidence with {source_count} sources. Additional research may provide more clarity."
        ),
        ConfidenceLevel::Low => format!(
            "Low confidence. Limited sources ({source_count}) or insufficient evidence for this query."
        ),
    }
}
