//! Locate the text to extract from

use crate::error::ExtractorError;
use clarify_llm::{Message, Role, StopReason};

/// Text of the most recent assistant message
///
/// Walks backward. The first assistant message reached must have finished
/// normally, otherwise the reply is reported incomplete; assistant messages
/// without text parts are skipped.
pub fn last_assistant_text(messages: &[Message]) -> Result<String, ExtractorError> {
    for message in messages.iter().rev() {
        if message.role != Role::Assistant {
            continue;
        }
        let stop_reason = message.stop_reason.unwrap_or(StopReason::Stop);
        if stop_reason != StopReason::Stop {
            return Err(ExtractorError::Incomplete(stop_reason));
        }
        if let Some(text) = message.text() {
            if text.is_empty() {
                break;
            }
            return Ok(text);
        }
    }
    Err(ExtractorError::NoAssistantMessages)
}
