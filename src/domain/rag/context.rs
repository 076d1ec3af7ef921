use crate::domain::research::ResearchDocument;

/// Number documents for the generation prompt.
///
/// Each block reads `[i] <content>` followed by a `Source: <title>` line;
/// blocks are separated by a blank line.
pub fn build_context(documents: &[ResearchDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("[{}] {}\nSource: {}", i + 1, doc.content, doc.metadata.title))
        .collect::<Vec<_>>()
        .join("\n\n")
}
