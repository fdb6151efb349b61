//! Parse the line-oriented extraction reply

use crate::types::ExtractionResult;

/// Exact reply meaning "no questions"
pub const NO_QUESTIONS_SENTINEL: &str = "NO_QUESTIONS_FOUND";

/// Parse a completed extraction reply into questions
///
/// Lines are trimmed and empty lines dropped; order is preserved.
pub fn parse_extraction_response(response: &str) -> ExtractionResult {
    if response.trim() == NO_QUESTIONS_SENTINEL {
        return ExtractionResult::NoQuestions;
    }

    let questions: Vec<String> = response
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if questions.is_empty() {
        ExtractionResult::NoQuestions
    } else {
        ExtractionResult::Questions(questions)
    }
}
