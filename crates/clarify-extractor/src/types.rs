//! Extraction outcome

use clarify_domain::Question;

/// Result of an extraction operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// One or more questions, in the order they appeared
    Questions(Vec<Question>),

    /// The text holds no questions
    NoQuestions,

    /// The call was cancelled before it finished
    Aborted,
}

impl ExtractionResult {
    /// The extracted questions, if any
    pub fn questions(&self) -> Option<&[Question]> {
        match self {
            ExtractionResult::Questions(questions) => Some(questions),
            _ => None,
        }
    }

    /// Whether the call was cancelled
    pub fn is_aborted(&self) -> bool {
        matches!(self, ExtractionResult::Aborted)
    }
}
