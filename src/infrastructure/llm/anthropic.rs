use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Messages API provider
#[derive(Debug)]
pub struct AnthropicProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> AnthropicProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let (system, messages) = split_system_messages(&request.messages);

        let anthropic_messages: Vec<AnthropicMessage> =
            messages.into_iter().map(AnthropicMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": anthropic_messages,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        if let Some(system_content) = system {
            body["system"] = serde_json::json!(system_content);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", ANTHROPIC_VERSION),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: AnthropicResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("anthropic", format!("Failed to parse response: {}", e))
        })?;

        // Non-text blocks are ignored; an empty reply yields an empty string
        let content = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(
            LlmResponse::new(response.id, response.model, Message::assistant(content))
                .with_finish_reason(parse_stop_reason(response.stop_reason.as_deref()))
                .with_usage(Usage::new(
                    response.usage.input_tokens,
                    response.usage.output_tokens,
                )),
        )
    }
}

/// Lift system messages into Anthropic's top-level `system` field
fn split_system_messages(messages: &[Message]) -> (Option<String>, Vec<&Message>) {
    let mut system_content = String::new();
    let mut other_messages = Vec::new();

    for msg in messages {
        if msg.role == MessageRole::System {
            if !system_content.is_empty() {
                system_content.push('\n');
            }
            system_content.push_str(msg.content_text());
        } else {
            other_messages.push(msg);
        }
    }

    let system = (!system_content.is_empty()).then_some(system_content);
    (system, other_messages)
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for AnthropicProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.messages_url();
        let body = self.build_request(model, &request);

        debug!(model = %model, messages = request.messages.len(), "Sending Anthropic request");

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => DomainError::provider("anthropic", message),
                other => other,
            })?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}

fn parse_stop_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("max_tokens") => FinishReason::Length,
        Some("tool_use") => FinishReason::ToolCalls,
        Some("refusal") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

impl AnthropicMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::Assistant => "assistant",
            MessageRole::User | MessageRole::System => "user",
        };

        Self {
            role,
            content: message.content_text().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
