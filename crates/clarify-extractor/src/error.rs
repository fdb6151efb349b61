//! Error types for the Extractor

use clarify_llm::{LlmError, StopReason};
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion backend failure; carries the backend's diagnostic verbatim
    #[error("Extraction failed: {0}")]
    Llm(#[from] LlmError),

    /// Nothing to extract from
    #[error("Text is empty")]
    EmptyText,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The conversation holds no assistant text
    #[error("No assistant messages found")]
    NoAssistantMessages,

    /// The last assistant reply did not finish normally
    #[error("Last assistant message incomplete ({})", .0.as_str())]
    Incomplete(StopReason),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
