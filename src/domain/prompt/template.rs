//! Prompt template parsing and rendering
//!
//! Placeholders use the `{name}` syntax. Rendering is a single pass over the
//! original template, so values that themselves contain `{...}` text (user
//! queries, retrieved passages) are inserted verbatim and never re-expanded.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("valid placeholder regex"));

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template string and collect its placeholder names (first-seen order)
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut seen = BTreeSet::new();
        let mut variables = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if seen.insert(name.clone()) {
                variables.push(name);
            }
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Render with the given values; every placeholder must be bound
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self.variables.iter().find(|v| !values.contains_key(*v)) {
            return Err(TemplateError::MissingVariable {
                name: missing.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}
