//! LLM provider implementations

mod anthropic;

pub use anthropic::{AnthropicProvider, DEFAULT_ANTHROPIC_BASE_URL};
