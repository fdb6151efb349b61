//! OpenAI-compatible chat completions backend
//!
//! Most hosted providers expose an OpenAI-compatible `/chat/completions`
//! endpoint, so this one backend serves `openai` as well as compatible
//! proxies.

use crate::types::{
    CompletionOptions, CompletionRequest, CompletionResponse, ContentPart, Role, StopReason,
};
use crate::{cancellable, http_client, http_error, CompletionBackend, LlmError};
use async_trait::async_trait;
use clarify_domain::Model;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible backend
pub struct OpenAiBackend {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl OpenAiBackend {
    /// Create a backend against `base_url` (e.g. "https://api.openai.com/v1")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: http_client(120),
        }
    }

    fn build_body<'a>(model: &'a Model, request: &CompletionRequest) -> ApiRequest<'a> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system_prompt.is_empty() {
            messages.push(ApiMessage {
                role: "system".into(),
                content: Some(request.system_prompt.clone()),
            });
        }
        for message in &request.messages {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            if let Some(text) = message.text() {
                messages.push(ApiMessage {
                    role: role.into(),
                    content: Some(text),
                });
            }
        }
        ApiRequest {
            model: &model.id,
            messages,
            stream: false,
        }
    }

    fn to_response(api: ApiResponse) -> Result<CompletionResponse, LlmError> {
        let choice = api
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".into()))?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::Length,
            Some("tool_calls") | Some("function_call") => StopReason::ToolUse,
            _ => StopReason::Stop,
        };
        let content = choice
            .message
            .content
            .map(|text| vec![ContentPart::Text { text }])
            .unwrap_or_default();

        Ok(CompletionResponse {
            stop_reason,
            content,
        })
    }

    async fn send(
        &self,
        model: &Model,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::build_body(model, request);

        debug!(provider = %model.provider, model = %model.id, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(e.to_string()))?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let api: ApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {e}")))?;
        Self::to_response(api)
    }
}

impl Default for OpenAiBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
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
