//! Question and answer values

/// A clarification question.
///
/// Questions are opaque and order-significant. Two questions with identical
/// text are distinct entries, identified by their position in the sequence.
pub type Question = String;

/// Placeholder recorded when the operator submits an empty answer
pub const NO_ANSWER: &str = "(no answer)";

/// Placeholder shown for questions that never received an answer
pub const NOT_ANSWERED: &str = "(not answered)";

/// An answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The question exactly as it was presented
    pub question: Question,

    /// The normalized answer text (never empty)
    pub answer: String,
}

impl Answer {
    /// Record an answer, normalizing the raw submission
    ///
    /// # Examples
    ///
    /// ```
    /// use clarify_domain::{Answer, NO_ANSWER};
    ///
    /// let answer = Answer::new("Which database?", "  Postgres \n");
    /// assert_eq!(answer.answer, "Postgres");
    ///
    /// let skipped = Answer::new("Which database?", "   ");
    /// assert_eq!(skipped.answer, NO_ANSWER);
    /// ```
    pub fn new(question: impl Into<Question>, raw_answer: &str) -> Self {
        Self {
            question: question.into(),
            answer: normalize_answer(raw_answer),
        }
    }
}

/// Trim a submitted answer, replacing an empty result with [`NO_ANSWER`]
pub fn normalize_answer(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_ANSWER.to_string()
    } else {
        trimmed.to_string()
    }
}
