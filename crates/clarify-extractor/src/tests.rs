//! End-to-end tests for the extraction flow

#[cfg(test)]
mod tests {
    use crate::{
        last_assistant_text, select_extraction_model, ExtractionResult, ExtractorConfig,
        ExtractorError, QuestionExtractor,
    };
    use clarify_domain::Model;
    use clarify_llm::{
        CompletionResponse, Credential, LlmError, Message, MockBackend, ProviderEntry,
        StaticRegistry, StopReason,
    };
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn conversation(last_reply: &str) -> Vec<Message> {
        vec![
            Message::user("Set up the project"),
            Message::assistant(&CompletionResponse::text_reply(last_reply, StopReason::Stop)),
        ]
    }

    fn registry() -> StaticRegistry {
        StaticRegistry::new().with_provider(
            "anthropic",
            ProviderEntry::new(
                ["claude-sonnet-4-5", "claude-haiku-4-5"],
                Credential::Literal("sk-test".into()),
            ),
        )
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let reply = "I have a few questions: What database do you prefer? \
                     We support MySQL and PostgreSQL. Also, should we use TypeScript?";
        let mut backend = MockBackend::default();
        backend.add_response(
            reply,
            "What database do you prefer? (We support MySQL and PostgreSQL)\nShould we use TypeScript?",
        );

        let config = ExtractorConfig::default();
        let current = Model::new("anthropic", "claude-sonnet-4-5");
        let model = select_extraction_model(&current, &config.cheap_table(), &registry()).await;
        assert_eq!(model.id, "claude-haiku-4-5");

        let text = last_assistant_text(&conversation(reply)).unwrap();
        let extractor = QuestionExtractor::new(backend.clone(), config);
        let result = extractor
            .extract(&text, &model, Some("sk-test".into()), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.questions().map(<[String]>::len), Some(2));
        let (seen_model, _) = backend.last_call().unwrap();
        assert_eq!(seen_model, model);
    }

    #[tokio::test]
    async fn test_extraction_no_questions() {
        let extractor =
            QuestionExtractor::new(MockBackend::new("NO_QUESTIONS_FOUND\n"), ExtractorConfig::default());
        let result = extractor
            .extract("All done.", &Model::new("mock", "m"), None, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result, ExtractionResult::NoQuestions);
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let mut backend = MockBackend::default();
        backend.add_error("boom");
        let extractor = QuestionExtractor::new(backend.clone(), ExtractorConfig::default());
        let result = extractor
            .extract("boom", &Model::new("mock", "m"), None, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(ExtractorError::Llm(LlmError::Other(_)))));
        // Not retried
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_operator_cancel_aborts_extraction() {
        let backend = MockBackend::new("Q?").with_delay(Duration::from_secs(3600));
        let extractor = QuestionExtractor::new(backend, ExtractorConfig::default());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = extractor
            .extract("text", &Model::new("mock", "m"), None, &cancel)
            .await
            .unwrap();
        assert_eq!(result, ExtractionResult::Aborted);
    }

    #[test]
    fn test_http_failure_message_keeps_diagnostic() {
        let err = ExtractorError::from(LlmError::http(401, "invalid x-api-key"));
        assert_eq!(
            err.to_string(),
            "Extraction failed: HTTP 401 (authentication failed): invalid x-api-key"
        );
    }
}
