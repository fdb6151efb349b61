//! Chat session: an in-memory conversation with the active model.

use crate::commands::qna::extract_and_collect;
use crate::error::Result;
use crate::transcript;
use clarify_domain::Model;
use clarify_extractor::{ExtractorConfig, QuestionExtractor};
use clarify_llm::{
    CompletionBackend, CompletionOptions, CompletionRequest, Message, ModelRegistry,
};
use clarify_tui::{InteractiveUi, NotifyLevel};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// System instruction for chat turns
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful assistant. When you need information \
from the user before you can proceed, ask clear, specific questions.";

/// A conversation with the active model
pub struct ChatSession<B, R>
where
    B: CompletionBackend + Clone,
    R: ModelRegistry,
{
    backend: B,
    registry: R,
    extractor: QuestionExtractor<B>,
    model: Option<Model>,
    messages: Vec<Message>,
    transcript: Option<PathBuf>,
}

impl<B, R> ChatSession<B, R>
where
    B: CompletionBackend + Clone,
    R: ModelRegistry,
{
    /// Create an empty session
    pub fn new(backend: B, registry: R, extractor: ExtractorConfig, model: Option<Model>) -> Self {
        Self {
            extractor: QuestionExtractor::new(backend.clone(), extractor),
            backend,
            registry,
            model,
            messages: Vec::new(),
            transcript: None,
        }
    }

    /// Resume from and append to a transcript file
    pub fn with_transcript(mut self, path: PathBuf) -> Result<Self> {
        if path.exists() {
            self.messages = transcript::load(&path)?;
        }
        self.transcript = Some(path);
        Ok(self)
    }

    /// The active model
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Switch the active model
    pub fn set_model(&mut self, model: Model) {
        info!(model = %model, "Switched model");
        self.model = Some(model);
    }

    /// The model registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Conversation so far
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn record(&mut self, message: Message) -> Result<()> {
        if let Some(path) = &self.transcript {
            transcript::append(path, &message)?;
        }
        self.messages.push(message);
        Ok(())
    }

    /// Send a user turn and return the reply text
    ///
    /// `None` when no model is selected or the operator aborted the call; the
    /// user turn stays in the conversation either way.
    pub async fn send<U: InteractiveUi>(&mut self, ui: &mut U, text: &str) -> Result<Option<String>> {
        let Some(model) = self.model.clone() else {
            ui.notify(NotifyLevel::Error, "No model selected");
            return Ok(None);
        };
        self.record(Message::user(text))?;

        let request = CompletionRequest::new(CHAT_SYSTEM_PROMPT, self.messages.clone());
        let api_key = self.registry.api_key(&model).await;
        let cancel = CancellationToken::new();
        let options = CompletionOptions::new(api_key, cancel.clone());
        debug!(model = %model, turns = self.messages.len(), "Sending chat turn");

        let response = ui
            .run_with_loader(
                &format!("Waiting for {}...", model.id),
                &cancel,
                self.backend.complete(&model, &request, &options),
            )
            .await??;

        if response.is_aborted() {
            ui.notify(NotifyLevel::Info, "Cancelled");
            return Ok(None);
        }

        let reply = response.text();
        self.record(Message::assistant(&response))?;
        Ok(Some(reply))
    }

    /// Interview the operator about the last reply's questions
    ///
    /// Returns the answers, which the caller sends as the next user turn.
    pub async fn collect_answers<U: InteractiveUi>(&self, ui: &mut U) -> Result<Option<String>> {
        extract_and_collect(
            &self.messages,
            self.model.as_ref(),
            &self.extractor,
            &self.registry,
            ui,
        )
        .await
    }
}
