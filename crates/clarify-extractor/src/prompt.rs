//! The fixed extraction instruction

use clarify_llm::{CompletionRequest, Message};

/// System instruction sent with every extraction call
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a question extractor. Given text from a conversation, extract any questions that need answering.

Output format:
- Output ONLY the questions, one per line
- Do not include numbering, prefixes like "Q:", or any other formatting
- If no questions are found, output exactly: NO_QUESTIONS_FOUND
- When there is important context needed to answer a question, include it in parentheses after the question

Example input:
"I have a few questions: What database do you prefer? We support MySQL and PostgreSQL. Also, should we use TypeScript?"

Example output:
What database do you prefer? (We support MySQL and PostgreSQL)
Should we use TypeScript?

Keep questions in the order they appeared. Be concise."#;

/// Build the single-turn extraction request for `text`
pub fn build_request(text: &str) -> CompletionRequest {
    CompletionRequest::new(EXTRACTION_SYSTEM_PROMPT, vec![Message::user(text)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NO_QUESTIONS_SENTINEL;

    #[test]
    fn test_request_has_one_user_turn() {
        let request = build_request("Which DB? And which ORM?");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(
            request.last_user_text().as_deref(),
            Some("Which DB? And which ORM?")
        );
        assert_eq!(request.system_prompt, EXTRACTION_SYSTEM_PROMPT);
    }

    #[test]
    fn test_prompt_names_sentinel() {
        assert!(EXTRACTION_SYSTEM_PROMPT.contains(NO_QUESTIONS_SENTINEL));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("one per line"));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("in parentheses"));
    }
}
