//! Mock backend for deterministic testing
//!
//! Returns pre-configured replies without making any network calls. Replies
//! are chosen by the text of the last user message in the request.

use crate::types::{CompletionOptions, CompletionRequest, CompletionResponse, StopReason};
use crate::{cancellable, CompletionBackend, LlmError};
use async_trait::async_trait;
use clarify_domain::Model;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A scripted reply
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Successful completion with this text
    Text(String),
    /// Backend failure
    Error(String),
    /// Completion reported as aborted
    Aborted,
}

/// Mock completion backend
///
/// # Examples
///
/// ```
/// use clarify_llm::{MockBackend, MockReply};
///
/// let mut backend = MockBackend::default();
/// backend.add_response("prompt1", "response1");
/// backend.add_reply("prompt2", MockReply::Aborted);
/// assert_eq!(backend.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    delay: Option<Duration>,
    call_count: Arc<Mutex<usize>>,
    last_call: Arc<Mutex<Option<(Model, CompletionRequest)>>>,
}

impl MockBackend {
    /// Create a mock with a fixed text reply for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a mock with a fixed reply of any kind
    pub fn with_default(reply: MockReply) -> Self {
        Self {
            default_reply: reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            delay: None,
            call_count: Arc::new(Mutex::new(0)),
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    /// Delay every reply; the delay observes cancellation
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a text reply for requests whose last user message is `prompt`
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.add_reply(prompt, MockReply::Text(response.into()));
    }

    /// Add a reply of any kind for a given prompt
    pub fn add_reply(&mut self, prompt: impl Into<String>, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(prompt.into(), reply);
        }
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.add_reply(prompt, MockReply::Error("Mock error".to_string()));
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|c| *c).unwrap_or(0)
    }

    /// Model and request of the most recent call
    pub fn last_call(&self) -> Option<(Model, CompletionRequest)> {
        self.last_call.lock().ok().and_then(|c| c.clone())
    }

    fn reply_for(&self, request: &CompletionRequest) -> MockReply {
        let prompt = request.last_user_text().unwrap_or_default();
        self.replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(&prompt).cloned())
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }
        if let Ok(mut last) = self.last_call.lock() {
            *last = Some((model.clone(), request.clone()));
        }

        let reply = self.reply_for(request);
        let delay = self.delay;

        cancellable(&options.cancel, async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match reply {
                MockReply::Text(text) => Ok(CompletionResponse::text_reply(text, StopReason::Stop)),
                MockReply::Error(message) => Err(LlmError::Other(message)),
                MockReply::Aborted => Ok(CompletionResponse::aborted()),
            }
        })
        .await
    }
}
