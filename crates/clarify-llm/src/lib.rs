//! Clarify LLM Backend Layer
//!
//! Pluggable text-completion backends behind one async trait.
//!
//! # Architecture
//!
//! The extractor only ever needs a single call: given a system instruction and
//! a list of messages, return generated text or an "aborted" status. Every
//! backend implements [`CompletionBackend`] and honors the cancellation token
//! carried in [`CompletionOptions`].
//!
//! # Backends
//!
//! - `MockBackend`: Deterministic mock for testing
//! - `OllamaBackend`: Local Ollama chat API
//! - `AnthropicBackend`: Anthropic Messages API
//! - `OpenAiBackend`: OpenAI-compatible chat completions
//! - `ProviderRouter`: Dispatches on the model's provider
//!
//! # Examples
//!
//! ```
//! use clarify_domain::Model;
//! use clarify_llm::{CompletionBackend, CompletionOptions, CompletionRequest, Message, MockBackend};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let backend = MockBackend::new("Hello from LLM!");
//!     let request = CompletionRequest::new("system", vec![Message::user("hi")]);
//!     let response = backend
//!         .complete(&Model::new("mock", "m"), &request, &CompletionOptions::default())
//!         .await
//!         .unwrap();
//!     assert_eq!(response.text(), "Hello from LLM!");
//! });
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod registry;
pub mod router;
pub mod types;

use async_trait::async_trait;
use clarify_domain::Model;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use anthropic::AnthropicBackend;
pub use mock::{MockBackend, MockReply};
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
pub use registry::{Credential, ModelRegistry, ProviderEntry, StaticRegistry};
pub use router::{ProviderKind, ProviderRouter};
pub use types::{
    CompletionOptions, CompletionRequest, CompletionResponse, ContentPart, Message, Role,
    StopReason,
};

/// Classification of an HTTP failure status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 401 / 403
    Authentication,
    /// 404
    NotFound,
    /// 429
    RateLimited,
    /// Any other 4xx
    Client,
    /// 5xx
    Server,
    /// Anything else that is not a success
    Unexpected,
}

impl StatusClass {
    /// Classify an HTTP status code
    pub fn of(status: u16) -> Self {
        match status {
            401 | 403 => StatusClass::Authentication,
            404 => StatusClass::NotFound,
            429 => StatusClass::RateLimited,
            400..=499 => StatusClass::Client,
            500..=599 => StatusClass::Server,
            _ => StatusClass::Unexpected,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusClass::Authentication => "authentication failed",
            StatusClass::NotFound => "not found",
            StatusClass::RateLimited => "rate limited",
            StatusClass::Client => "client error",
            StatusClass::Server => "server error",
            StatusClass::Unexpected => "unexpected status",
        };
        f.write_str(label)
    }
}

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure before a response arrived
    #[error("Communication error: {0}")]
    Communication(String),

    /// Backend answered with a non-success status; `body` is the raw reply
    #[error("HTTP {status} ({class}): {body}")]
    Http {
        /// Status code
        status: u16,
        /// Classification of the status
        class: StatusClass,
        /// Raw response body
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No backend registered for the model's provider
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Build an HTTP error, classifying the status
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        LlmError::Http {
            status,
            class: StatusClass::of(status),
            body: body.into(),
        }
    }

    /// Status classification, for HTTP failures
    pub fn status_class(&self) -> Option<StatusClass> {
        match self {
            LlmError::Http { class, .. } => Some(*class),
            _ => None,
        }
    }
}

/// A text-completion backend
///
/// Implementations must resolve to a response with [`StopReason::Aborted`]
/// (not an error) when `options.cancel` fires before the call finishes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError>;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        (**self).complete(model, request, options).await
    }
}

/// Race a backend call against the cancellation token
///
/// A token that is already cancelled wins without polling the call.
pub(crate) async fn cancellable<F>(
    cancel: &CancellationToken,
    call: F,
) -> Result<CompletionResponse, LlmError>
where
    F: Future<Output = Result<CompletionResponse, LlmError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Ok(CompletionResponse::aborted()),
        result = call => result,
    }
}

/// Build the shared HTTP client used by the network backends
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Read a non-success response into an [`LlmError::Http`]
pub(crate) async fn http_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::warn!(status, body = %body, "completion request failed");
    LlmError::http(status, body)
}
