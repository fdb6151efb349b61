//! Anthropic Messages API backend
//!
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field

use crate::types::{
    CompletionOptions, CompletionRequest, CompletionResponse, ContentPart, Role, StopReason,
};
use crate::{cancellable, http_client, http_error, CompletionBackend, LlmError};
use async_trait::async_trait;
use clarify_domain::Model;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default Anthropic API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic Messages API backend
pub struct AnthropicBackend {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

impl AnthropicBackend {
    /// Create a backend against `base_url` (e.g. "https://api.anthropic.com")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: http_client(300),
        }
    }

    fn build_body<'a>(model: &'a Model, request: &'a CompletionRequest) -> AnthropicRequest<'a> {
        AnthropicRequest {
            model: &model.id,
            max_tokens: DEFAULT_MAX_TOKENS,
            system: &request.system_prompt,
            messages: request
                .messages
                .iter()
                .filter_map(|m| {
                    let role = match m.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    };
                    m.text().map(|content| AnthropicMessage { role, content })
                })
                .collect(),
        }
    }

    fn to_response(api: AnthropicResponse) -> CompletionResponse {
        let stop_reason = match api.stop_reason.as_deref() {
            Some("max_tokens") => StopReason::Length,
            Some("tool_use") => StopReason::ToolUse,
            _ => StopReason::Stop,
        };
        let content = api
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(ContentPart::Text { text }),
                ContentBlock::Thinking { thinking } => Some(ContentPart::Thinking { thinking }),
                ContentBlock::ToolUse { name, input } => Some(ContentPart::ToolCall {
                    name,
                    arguments: input,
                }),
                ContentBlock::Unknown => None,
            })
            .collect();
        CompletionResponse {
            stop_reason,
            content,
        }
    }

    async fn send(
        &self,
        model: &Model,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = Self::build_body(model, request);

        debug!(provider = "anthropic", model = %model.id, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(e.to_string()))?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let api: AnthropicResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse Anthropic response: {e}"))
        })?;
        Ok(Self::to_response(api))
    }
}

impl Default for AnthropicBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let api_key = options.api_key.as_deref().unwrap_or_default();
        cancellable(&options.cancel, self.send(model, request, api_key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    #[test]
    fn test_body_uses_top_level_system() {
        let model = Model::new("anthropic", "claude-haiku-4-5");
        let request = CompletionRequest::new("extract", vec![Message::user("text")]);
        let body = serde_json::to_value(AnthropicBackend::build_body(&model, &request)).unwrap();
        assert_eq!(body["model"], "claude-haiku-4-5");
        assert_eq!(body["system"], "extract");
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "text");
    }

    #[test]
    fn test_empty_system_omitted() {
        let model = Model::new("anthropic", "claude-haiku-4-5");
        let request = CompletionRequest::new("", vec![Message::user("text")]);
        let body = serde_json::to_value(AnthropicBackend::build_body(&model, &request)).unwrap();
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_response_conversion() {
        let api: AnthropicResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "thinking", "thinking": "hmm", "signature": "x"},
                    {"type": "text", "text": "Which DB?"},
                    {"type": "redacted_thinking", "data": "..."}
                ],
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();
        let response = AnthropicBackend::to_response(api);
        assert_eq!(response.stop_reason, StopReason::Stop);
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.text(), "Which DB?");
    }

    #[test]
    fn test_stop_reason_mapping() {
        let max: AnthropicResponse =
            serde_json::from_str(r#"{"content": [], "stop_reason": "max_tokens"}"#).unwrap();
        assert_eq!(AnthropicBackend::to_response(max).stop_reason, StopReason::Length);

        let tool: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use", "id": "t1", "name": "qna", "input": {}}], "stop_reason": "tool_use"}"#,
        )
        .unwrap();
        let response = AnthropicBackend::to_response(tool);
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert!(matches!(response.content[0], ContentPart::ToolCall { .. }));
    }

    #[test]
    fn test_base_url_trimmed() {
        let backend = AnthropicBackend::new("http://proxy.local/");
        assert_eq!(backend.base_url, "http://proxy.local");
    }
}
