//! Core QuestionExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_extraction_response;
use crate::prompt::build_request;
use crate::types::ExtractionResult;
use clarify_domain::Model;
use clarify_llm::{CompletionBackend, CompletionOptions};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Turns free-form text into a list of questions using a completion backend
pub struct QuestionExtractor<B>
where
    B: CompletionBackend,
{
    backend: B,
    config: ExtractorConfig,
}

impl<B> QuestionExtractor<B>
where
    B: CompletionBackend,
{
    /// Create a new extractor
    pub fn new(backend: B, config: ExtractorConfig) -> Self {
        Self { backend, config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract questions from `text`
    ///
    /// Sends exactly one request. When `cancel` fires, or the configured
    /// timeout expires, the call is cancelled and the result is
    /// [`ExtractionResult::Aborted`]; partial output is never parsed. Backend
    /// failures propagate unchanged and are not retried.
    pub async fn extract(
        &self,
        text: &str,
        model: &Model,
        api_key: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<ExtractionResult, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        info!(model = %model, text_length = length, "Extracting questions");

        let request = build_request(text);
        let call_token = cancel.child_token();
        let options = CompletionOptions::new(api_key, call_token.clone());

        let call = self.backend.complete(model, &request, &options);
        tokio::pin!(call);

        let timeout = self.config.extraction_timeout();
        let deadline = async {
            match timeout {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
        };

        let response = tokio::select! {
            result = &mut call => result?,
            _ = deadline => {
                warn!(
                    timeout_secs = self.config.extraction_timeout_secs,
                    "Extraction timed out; cancelling"
                );
                call_token.cancel();
                call.await?
            }
        };

        if response.is_aborted() {
            info!("Extraction aborted");
            return Ok(ExtractionResult::Aborted);
        }

        let reply = response.text();
        debug!(reply_length = reply.len(), "Extraction reply received");

        let result = parse_extraction_response(&reply);
        match &result {
            ExtractionResult::Questions(questions) => {
                info!(count = questions.len(), "Extracted questions")
            }
            _ => info!("No questions found"),
        }
        Ok(result)
    }
}
