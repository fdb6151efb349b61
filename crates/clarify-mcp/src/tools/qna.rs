//! qna tool - Ask the operator a series of questions one at a time

use crate::error::McpError;
use crate::protocol::{ToolContent, ToolDefinition};
use clarify_domain::{format_outcome, CollectionOutcome, Question};
use clarify_tui::{truncate_to_width, InteractiveUi};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

/// Tool name
pub const QNA_TOOL: &str = "qna";

const NO_UI: &str = "Error: UI not available (running in non-interactive mode)";
const NO_QUESTIONS: &str = "Error: No questions provided";
const SUMMARY_QUESTION_WIDTH: usize = 40;

/// Parameters for the qna tool
#[derive(Debug, Default, Deserialize)]
pub struct QnaParams {
    /// Questions to ask, in order
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One answered question in the structured result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDetail {
    /// The question
    pub question: String,
    /// The normalized answer
    pub answer: String,
}

/// Structured interview record returned alongside the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QnaDetails {
    /// Questions asked
    pub questions: Vec<Question>,
    /// Answers collected
    pub answers: Vec<AnswerDetail>,
    /// Whether the operator cancelled
    pub cancelled: bool,
    /// Question index at cancellation, -1 when not cancelled mid-interview
    pub cancelled_at_index: i64,
}

impl QnaDetails {
    /// Details for a call that never reached the interview
    pub fn not_started() -> Self {
        Self {
            questions: Vec::new(),
            answers: Vec::new(),
            cancelled: true,
            cancelled_at_index: -1,
        }
    }
}

impl From<&CollectionOutcome> for QnaDetails {
    fn from(outcome: &CollectionOutcome) -> Self {
        Self {
            questions: outcome.questions.clone(),
            answers: outcome
                .answers
                .iter()
                .map(|a| AnswerDetail {
                    question: a.question.clone(),
                    answer: a.answer.clone(),
                })
                .collect(),
            cancelled: outcome.cancelled,
            cancelled_at_index: outcome.cancelled_at_index(),
        }
    }
}

/// Result of a qna invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaToolResult {
    /// Text handed back to the requester
    pub content: Vec<ToolContent>,
    /// Structured record, absent when the host strips it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<QnaDetails>,
    /// Set when a precondition failed
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl QnaToolResult {
    fn precondition_failed(message: &str) -> Self {
        Self {
            content: vec![ToolContent::text(message)],
            details: Some(QnaDetails::not_started()),
            is_error: true,
        }
    }

    /// First text block
    pub fn text(&self) -> &str {
        self.content
            .iter()
            .map(|ToolContent::Text { text }| text.as_str())
            .next()
            .unwrap_or("")
    }
}

/// Definition advertised on `tools/list`
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: QNA_TOOL.to_string(),
        description: "Ask the user a series of questions one at a time. Each question is \
                      answered individually before moving to the next. Use this when you have \
                      multiple clarifying questions and want to collect all answers before \
                      proceeding."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of questions to ask the user, one at a time"
                }
            },
            "required": ["questions"]
        }),
    }
}

/// Handle qna tool invocation
///
/// Preconditions (an interactive surface, at least one question) are reported
/// as error results rather than protocol errors, so the requester sees them.
pub async fn handle_qna<U>(ui: &mut U, params: QnaParams) -> Result<QnaToolResult, McpError>
where
    U: InteractiveUi,
{
    if !ui.has_ui() {
        return Ok(QnaToolResult::precondition_failed(NO_UI));
    }
    if params.questions.is_empty() {
        return Ok(QnaToolResult::precondition_failed(NO_QUESTIONS));
    }

    debug!(count = params.questions.len(), "Starting qna interview");
    let outcome = ui.collect_answers(&params.questions).await?;
    let formatted = format_outcome(&outcome);
    info!(
        cancelled = formatted.cancelled,
        answered = outcome.answers.len(),
        "qna interview finished"
    );

    Ok(QnaToolResult {
        content: vec![ToolContent::text(formatted.text)],
        details: Some(QnaDetails::from(&outcome)),
        is_error: false,
    })
}

/// One-line summary of a call, e.g. `qna 3 questions`
pub fn render_call(params: &QnaParams) -> String {
    let count = params.questions.len();
    let noun = if count == 1 { "question" } else { "questions" };
    format!("{} {} {}", QNA_TOOL, count, noun)
}

/// Short summary of a result
pub fn render_result(result: &QnaToolResult) -> String {
    let Some(details) = &result.details else {
        return result.text().to_string();
    };
    if details.cancelled {
        return "Cancelled".to_string();
    }
    details
        .answers
        .iter()
        .map(|a| {
            format!(
                "✓ {} → {}",
                truncate_to_width(&a.question, SUMMARY_QUESTION_WIDTH),
                a.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
