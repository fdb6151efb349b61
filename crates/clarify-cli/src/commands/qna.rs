//! Qna command implementation.

use crate::cli::QnaArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::transcript;
use clarify_domain::{format_outcome, Model};
use clarify_extractor::{
    last_assistant_text, select_extraction_model, ExtractionResult, ExtractorError,
    QuestionExtractor,
};
use clarify_llm::{CompletionBackend, Message, ModelRegistry};
use clarify_tui::{InteractiveUi, NotifyLevel, Surface, TerminalUi, Theme};
use std::io::{self, Read};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Find the questions in the last assistant message and interview the operator.
///
/// Returns the formatted answers to inject as the next user turn, or `None`
/// when there is nothing to inject; the operator has then already been told
/// why through `ui`.
pub async fn extract_and_collect<B, R, U>(
    messages: &[Message],
    model: Option<&Model>,
    extractor: &QuestionExtractor<B>,
    registry: &R,
    ui: &mut U,
) -> Result<Option<String>>
where
    B: CompletionBackend,
    R: ModelRegistry,
    U: InteractiveUi,
{
    if !ui.has_ui() {
        ui.notify(NotifyLevel::Error, "qna requires interactive mode");
        return Ok(None);
    }
    let Some(model) = model else {
        ui.notify(NotifyLevel::Error, "No model selected");
        return Ok(None);
    };

    let text = match last_assistant_text(messages) {
        Ok(text) => text,
        Err(e @ (ExtractorError::Incomplete(_) | ExtractorError::NoAssistantMessages)) => {
            ui.notify(NotifyLevel::Error, &e.to_string());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let table = extractor.config().cheap_table();
    let extraction_model = select_extraction_model(model, &table, registry).await;
    let api_key = registry.api_key(&extraction_model).await;
    debug!(model = %extraction_model, "Extraction model selected");

    let cancel = CancellationToken::new();
    let message = format!("Extracting questions using {}...", extraction_model.id);
    let extraction = ui
        .run_with_loader(
            &message,
            &cancel,
            extractor.extract(&text, &extraction_model, api_key, &cancel),
        )
        .await?;

    let questions = match extraction {
        Err(e) => {
            ui.notify(NotifyLevel::Error, &e.to_string());
            return Ok(None);
        }
        Ok(ExtractionResult::Aborted) => {
            ui.notify(NotifyLevel::Info, "Cancelled");
            return Ok(None);
        }
        Ok(ExtractionResult::NoQuestions) => {
            ui.notify(NotifyLevel::Info, "No questions found in the last message");
            return Ok(None);
        }
        Ok(ExtractionResult::Questions(questions)) if questions.is_empty() => {
            ui.notify(NotifyLevel::Info, "No questions found in the last message");
            return Ok(None);
        }
        Ok(ExtractionResult::Questions(questions)) => questions,
    };

    let outcome = ui.collect_answers(&questions).await?;
    let formatted = format_outcome(&outcome);
    if formatted.cancelled {
        ui.notify(NotifyLevel::Info, "Cancelled");
        return Ok(None);
    }

    info!(answered = outcome.answers.len(), "Collected answers");
    Ok(Some(formatted.text))
}

/// Execute the qna command.
pub async fn execute_qna(
    args: QnaArgs,
    config: &Config,
    model: Option<Model>,
    formatter: &Formatter,
) -> Result<()> {
    let messages = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        transcript::parse(&buffer)?
    } else if let Some(path) = &args.transcript {
        transcript::load(path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a transcript or --stdin".to_string(),
        ));
    };

    let extractor = QuestionExtractor::new(config.router(), config.extractor.clone());
    let registry = config.registry();
    let mut ui = TerminalUi::new(Surface::Stderr, Theme::new(formatter.color_enabled()));

    let Some(answers) =
        extract_and_collect(&messages, model.as_ref(), &extractor, &registry, &mut ui).await?
    else {
        return Ok(());
    };

    match &args.transcript {
        Some(path) if !args.print => {
            transcript::append(path, &Message::user(answers))?;
            eprintln!(
                "{}",
                formatter.success(&format!("Answers appended to {}", path.display()))
            );
        }
        _ => println!("{}", answers),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_extractor::ExtractorConfig;
    use clarify_llm::{
        CompletionResponse, Credential, MockBackend, MockReply, ProviderEntry, StaticRegistry,
        StopReason,
    };
    use clarify_tui::ScriptedUi;

    fn assistant(text: &str) -> Message {
        Message::assistant(&CompletionResponse::text_reply(text, StopReason::Stop))
    }

    fn registry() -> StaticRegistry {
        StaticRegistry::new().with_provider(
            "anthropic",
            ProviderEntry::new(
                ["claude-sonnet-4-5", "claude-haiku-4-5"],
                Credential::Literal("key".into()),
            ),
        )
    }

    fn model() -> Model {
        Model::new("anthropic", "claude-sonnet-4-5")
    }

    #[tokio::test]
    async fn test_full_flow_uses_cheap_model() {
        let backend = MockBackend::new("Which DB?\nUse TypeScript?");
        let extractor = QuestionExtractor::new(backend.clone(), ExtractorConfig::default());
        let mut ui = ScriptedUi::answering(&["Postgres", "yes"]);
        let messages = vec![Message::user("plan it"), assistant("Which DB? TS?")];

        let answers = extract_and_collect(&messages, Some(&model()), &extractor, &registry(), &mut ui)
            .await
            .unwrap();

        assert_eq!(
            answers.as_deref(),
            Some("Q1: Which DB?\nA1: Postgres\n\nQ2: Use TypeScript?\nA2: yes")
        );
        let (used, _) = backend.last_call().unwrap();
        assert_eq!(used.id, "claude-haiku-4-5");
        assert_eq!(
            ui.loader_messages(),
            vec!["Extracting questions using claude-haiku-4-5...".to_string()]
        );
    }

    #[tokio::test]
    async fn test_no_questions() {
        let extractor =
            QuestionExtractor::new(MockBackend::new("NO_QUESTIONS_FOUND"), ExtractorConfig::default());
        let mut ui = ScriptedUi::new();
        let answers = extract_and_collect(
            &[assistant("All done.")],
            Some(&model()),
            &extractor,
            &registry(),
            &mut ui,
        )
        .await
        .unwrap();

        assert!(answers.is_none());
        assert_eq!(
            ui.notifications(),
            vec![(NotifyLevel::Info, "No questions found in the last message".to_string())]
        );
    }

    #[tokio::test]
    async fn test_loader_abort_reports_cancelled() {
        let extractor = QuestionExtractor::new(MockBackend::new("Q?"), ExtractorConfig::default());
        let mut ui = ScriptedUi::new().aborting_loader();
        let answers = extract_and_collect(
            &[assistant("Q?")],
            Some(&model()),
            &extractor,
            &registry(),
            &mut ui,
        )
        .await
        .unwrap();

        assert!(answers.is_none());
        assert_eq!(ui.notifications(), vec![(NotifyLevel::Info, "Cancelled".to_string())]);
    }

    #[tokio::test]
    async fn test_backend_failure_reported_once() {
        let extractor = QuestionExtractor::new(
            MockBackend::with_default(MockReply::Error("boom".into())),
            ExtractorConfig::default(),
        );
        let mut ui = ScriptedUi::new();
        let answers = extract_and_collect(
            &[assistant("Q?")],
            Some(&model()),
            &extractor,
            &registry(),
            &mut ui,
        )
        .await
        .unwrap();

        assert!(answers.is_none());
        let notes = ui.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, NotifyLevel::Error);
        assert!(notes[0].1.starts_with("Extraction failed:"));
        assert!(notes[0].1.contains("boom"));
    }

    #[tokio::test]
    async fn test_preconditions() {
        let backend = MockBackend::default();
        let extractor = QuestionExtractor::new(backend.clone(), ExtractorConfig::default());

        let mut headless = ScriptedUi::non_interactive();
        extract_and_collect(&[assistant("Q?")], Some(&model()), &extractor, &registry(), &mut headless)
            .await
            .unwrap();
        assert_eq!(
            headless.notifications(),
            vec![(NotifyLevel::Error, "qna requires interactive mode".to_string())]
        );

        let mut ui = ScriptedUi::new();
        extract_and_collect(&[assistant("Q?")], None, &extractor, &registry(), &mut ui)
            .await
            .unwrap();
        assert_eq!(ui.notifications()[0].1, "No model selected");

        let mut ui = ScriptedUi::new();
        extract_and_collect(&[Message::user("hi")], Some(&model()), &extractor, &registry(), &mut ui)
            .await
            .unwrap();
        assert_eq!(ui.notifications()[0].1, "No assistant messages found");

        let truncated =
            Message::assistant(&CompletionResponse::text_reply("Which", StopReason::Length));
        let mut ui = ScriptedUi::new();
        extract_and_collect(&[truncated], Some(&model()), &extractor, &registry(), &mut ui)
            .await
            .unwrap();
        assert_eq!(
            ui.notifications()[0].1,
            "Last assistant message incomplete (length)"
        );

        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_interview_cancel_injects_nothing() {
        let extractor =
            QuestionExtractor::new(MockBackend::new("A?\nB?"), ExtractorConfig::default());
        let mut ui = ScriptedUi::answering(&["x"]).with_keys([clarify_tui::keys::escape()]);
        let answers = extract_and_collect(
            &[assistant("A? B?")],
            Some(&model()),
            &extractor,
            &registry(),
            &mut ui,
        )
        .await
        .unwrap();

        assert!(answers.is_none());
        assert_eq!(ui.notifications(), vec![(NotifyLevel::Info, "Cancelled".to_string())]);
    }
}
