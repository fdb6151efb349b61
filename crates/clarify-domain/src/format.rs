//! Result formatting - canonical text for a collection outcome

use crate::outcome::CollectionOutcome;
use crate::question::NOT_ANSWERED;

/// First line of the text produced for a cancelled interview
pub const CANCELLED_HEADER: &str = "User cancelled. Questions were:";

/// Canonical text for an outcome, ready to hand to a model or print verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResult {
    /// Plain text, no control sequences
    pub text: String,

    /// Mirrors the outcome's cancellation flag
    pub cancelled: bool,
}

/// Format an outcome as `Q{n}: …` / `A{n}: …` lines.
///
/// Completed interviews produce one two-line block per answer, separated by a
/// blank line. Cancelled interviews produce a header followed by every
/// question, with `(not answered)` for the ones that were never reached.
///
/// Answers are paired with questions by position, so repeated question text
/// never borrows another occurrence's answer.
///
/// # Examples
///
/// ```
/// use clarify_domain::{format_outcome, Answer, CollectionOutcome};
///
/// let outcome = CollectionOutcome::completed(
///     vec!["q1".to_string(), "q2".to_string()],
///     vec![Answer::new("q1", "a1"), Answer::new("q2", "a2")],
/// );
/// let formatted = format_outcome(&outcome);
/// assert_eq!(formatted.text, "Q1: q1\nA1: a1\n\nQ2: q2\nA2: a2");
/// assert!(!formatted.cancelled);
/// ```
pub fn format_outcome(outcome: &CollectionOutcome) -> FormattedResult {
    if outcome.cancelled {
        let mut lines = vec![CANCELLED_HEADER.to_string()];
        for (i, question) in outcome.questions.iter().enumerate() {
            let answer = outcome
                .answers
                .get(i)
                .map(|a| a.answer.as_str())
                .unwrap_or(NOT_ANSWERED);
            lines.push(format!("Q{}: {}", i + 1, question));
            lines.push(format!("A{}: {}", i + 1, answer));
        }
        return FormattedResult {
            text: lines.join("\n"),
            cancelled: true,
        };
    }

    let text = outcome
        .answers
        .iter()
        .enumerate()
        .map(|(i, qa)| format!("Q{n}: {}\nA{n}: {}", qa.question, qa.answer, n = i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    FormattedResult {
        text,
        cancelled: false,
    }
}
