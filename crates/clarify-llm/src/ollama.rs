//! Ollama Backend Implementation
//!
//! Provides integration with Ollama's local chat API. Local models need no
//! credential, which makes Ollama the zero-setup default.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/chat` endpoint
//! - Configurable endpoint
//! - Cancellation through the request's token
//!
//! # Examples
//!
//! ```no_run
//! use clarify_llm::OllamaBackend;
//!
//! let backend = OllamaBackend::new("http://localhost:11434");
//! ```

use crate::types::{
    CompletionOptions, CompletionRequest, CompletionResponse, ContentPart, Message, Role,
    StopReason,
};
use crate::{cancellable, http_client, http_error, CompletionBackend, LlmError};
use async_trait::async_trait;
use clarify_domain::Model;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama API backend for local LLM inference
pub struct OllamaBackend {
    endpoint: String,
    client: reqwest::Client,
}

/// Request body for Ollama chat API
#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
    #[serde(default, skip_serializing)]
    thinking: Option<String>,
}

/// Response from Ollama chat API
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
    #[serde(default)]
    done_reason: Option<String>,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client: http_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a new Ollama backend on `http://localhost:11434`
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }

    fn to_api_messages(request: &CompletionRequest) -> Vec<OllamaMessage> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system_prompt.is_empty() {
            messages.push(OllamaMessage {
                role: "system".to_string(),
                content: request.system_prompt.clone(),
                thinking: None,
            });
        }
        messages.extend(request.messages.iter().map(|m: &Message| OllamaMessage {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            }
            .to_string(),
            content: m.text().unwrap_or_default(),
            thinking: None,
        }));
        messages
    }

    fn to_response(api: OllamaChatResponse) -> CompletionResponse {
        let stop_reason = match api.done_reason.as_deref() {
            Some("length") => StopReason::Length,
            _ => StopReason::Stop,
        };
        let mut content = Vec::new();
        if let Some(thinking) = api.message.thinking.filter(|t| !t.is_empty()) {
            content.push(ContentPart::Thinking { thinking });
        }
        content.push(ContentPart::text(api.message.content));
        CompletionResponse {
            stop_reason,
            content,
        }
    }

    async fn send(&self, model: &Model, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);
        let body = OllamaChatRequest {
            model: model.id.clone(),
            messages: Self::to_api_messages(request),
            stream: false,
        };

        debug!(provider = "ollama", model = %model.id, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let api: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(Self::to_response(api))
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        cancellable(&options.cancel, self.send(model, request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_ollama_backend_creation() {
        let backend = OllamaBackend::new("http://localhost:11434/");
        assert_eq!(backend.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_ollama_backend_default_endpoint() {
        let backend = OllamaBackend::default_endpoint();
        assert_eq!(backend.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_system_prompt_leads_messages() {
        let request = CompletionRequest::new("extract", vec![Message::user("text")]);
        let messages = OllamaBackend::to_api_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "extract");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "text");
    }

    #[test]
    fn test_response_parsing() {
        let api: OllamaChatResponse = serde_json::from_str(
            r#"{"model":"llama3","message":{"role":"assistant","content":"Which DB?"},"done":true,"done_reason":"stop"}"#,
        )
        .unwrap();
        let response = OllamaBackend::to_response(api);
        assert_eq!(response.stop_reason, StopReason::Stop);
        assert_eq!(response.text(), "Which DB?");
    }

    #[test]
    fn test_response_length_and_thinking() {
        let api: OllamaChatResponse = serde_json::from_str(
            r#"{"message":{"role":"assistant","content":"partial","thinking":"reasoning"},"done_reason":"length"}"#,
        )
        .unwrap();
        let response = OllamaBackend::to_response(api);
        assert_eq!(response.stop_reason, StopReason::Length);
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.text(), "partial");
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Nothing listens on port 1
        let backend = OllamaBackend::new("http://127.0.0.1:1");
        let request = CompletionRequest::new("sys", vec![Message::user("test")]);
        let result = backend
            .complete(&Model::new("ollama", "llama3"), &request, &CompletionOptions::default())
            .await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|r| r.stop_reason)),
        }
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let backend = OllamaBackend::new("http://127.0.0.1:1");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let request = CompletionRequest::new("sys", vec![Message::user("test")]);
        let response = backend
            .complete(
                &Model::new("ollama", "llama3"),
                &request,
                &CompletionOptions::new(None, cancel),
            )
            .await
            .unwrap();
        assert!(response.is_aborted());
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let backend = OllamaBackend::default_endpoint();
        let request = CompletionRequest::new("", vec![Message::user("Say 'hello' and nothing else")]);
        let result = backend
            .complete(&Model::new("ollama", "llama3.2"), &request, &CompletionOptions::default())
            .await;

        if let Ok(response) = result {
            assert!(!response.text().is_empty());
        }
    }
}
