//! Prompt templates with `{variable}` placeholders

mod template;

pub use template::{PromptTemplate, TemplateError};
