//! Recursive character text splitter
//!
//! Splits on the first separator present in the text (paragraphs, then
//! lines, then sentences, then words, then characters), recursing into
//! pieces that are still too long, and merges small pieces back into chunks
//! of at most `chunk_size` characters with `chunk_overlap` characters of
//! trailing context carried into the next chunk.

use crate::domain::DomainError;

pub const DEFAULT_CHUNK_SIZE: usize = 400;
pub const DEFAULT_CHUNK_OVERLAP: usize = 80;
const DEFAULT_SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, DomainError> {
        if chunk_size == 0 {
            return Err(DomainError::configuration("Chunk size must be greater than zero"));
        }
        if chunk_overlap >= chunk_size {
            return Err(DomainError::configuration(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            ..Default::default()
        })
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        // First separator present in the text; "" always matches
        let (index, separator) = separators
            .iter()
            .enumerate()
            .find(|(_, s)| s.is_empty() || text.contains(s.as_str()))
            .map(|(i, s)| (i, s.as_str()))
            .unwrap_or((separators.len(), ""));
        let remaining = separators.get(index + 1..).unwrap_or(&[]);

        let splits: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for split in splits {
            if char_len(&split) < self.chunk_size {
                pending.push(split);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge_splits(&pending, separator));
                pending.clear();
            }

            if remaining.is_empty() {
                chunks.push(split);
            } else {
                chunks.extend(self.split_recursive(&split, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge_splits(&pending, separator));
        }

        chunks
    }

    fn merge_splits(&self, splits: &[String], separator: &str) -> Vec<String> {
        let separator_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut total = 0;

        for split in splits {
            let len = char_len(split);
            let joined_len = |current: &[&str], total: usize| {
                total + len + if current.is_empty() { 0 } else { separator_len }
            };

            if joined_len(&current, total) > self.chunk_size && !current.is_empty() {
                if let Some(chunk) = join_chunk(&current, separator) {
                    chunks.push(chunk);
                }

                // Drop from the front until only the overlap remains
                while total > self.chunk_overlap
                    || (joined_len(&current, total) > self.chunk_size && total > 0)
                {
                    let dropped = char_len(current[0])
                        + if current.len() > 1 { separator_len } else { 0 };
                    total -= dropped;
                    current.remove(0);
                }
            }

            total += len + if current.is_empty() { 0 } else { separator_len };
            current.push(split);
        }

        if let Some(chunk) = join_chunk(&current, separator) {
            chunks.push(chunk);
        }

        chunks
    }
}

fn join_chunk(parts: &[&str], separator: &str) -> Option<String> {
    let joined = parts.join(separator);
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
