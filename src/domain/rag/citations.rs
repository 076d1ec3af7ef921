//! Bracketed numeric citations in generated answers

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::SourceRecord;

static CITATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([0-9]+)\]").expect("Invalid citation regex"));

/// Extract every `[n]` marker in order of appearance, keeping duplicates.
///
/// Markers whose number does not fit in a `u32` are skipped.
pub fn extract_citations(text: &str) -> Vec<u32> {
    CITATION_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse().ok())
        .collect()
}

/// Check that every citation points at an existing source.
///
/// Returns one message per out-of-range citation; an empty list means the
/// answer is consistent with `source_count`.
pub fn validate_citations(text: &str, source_count: usize) -> Vec<String> {
    extract_citations(text)
        .into_iter()
        .filter(|&c| c < 1 || c as usize > source_count)
        .map(|c| {
            format!(
                "Citation [{c}] references non-existent source (valid range: 1-{source_count})"
            )
        })
        .collect()
}

/// Cited sources resolved against the source list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationAlignment {
    /// Distinct citation numbers, ascending
    pub cited_indices: Vec<u32>,
    /// Sources for the in-range citations, in `cited_indices` order
    pub cited_sources: Vec<SourceRecord>,
    pub citation_count: usize,
    pub unique_citation_count: usize,
}

pub fn align_citations_with_sources(text: &str, sources: &[SourceRecord]) -> CitationAlignment {
    let citations = extract_citations(text);
    let mut unique = citations.clone();
    unique.sort_unstable();
    unique.dedup();

    let cited_sources = unique
        .iter()
        .filter(|&&i| i >= 1 && (i as usize) <= sources.len())
        .map(|&i| sources[i as usize - 1].clone())
        .collect();

    CitationAlignment {
        citation_count: citations.len(),
        unique_citation_count: unique.len(),
        cited_indices: unique,
        cited_sources,
    }
}

/// Render a reference-list entry: `[i] A, B, C et al.. Title. Journal, Year.`
pub fn format_citation(source: &SourceRecord, index: usize) -> String {
    let mut authors = source
        .authors
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if source.authors.len() > 3 {
        authors.push_str(" et al.");
    }

    let year = source
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "[{index}] {authors}. {}. {}, {year}.",
        source.title, source.journal
    )
}
