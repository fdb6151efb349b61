//! Request, response and conversation message types

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The operator
    User,
    /// The model
    Assistant,
}

/// Why a completion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// Natural end of the reply
    Stop,
    /// Token limit reached
    Length,
    /// The model requested a tool
    ToolUse,
    /// The backend reported an error mid-reply
    Error,
    /// The caller cancelled the request
    Aborted,
}

impl StopReason {
    /// Wire name (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Stop => "stop",
            StopReason::Length => "length",
            StopReason::ToolUse => "toolUse",
            StopReason::Error => "error",
            StopReason::Aborted => "aborted",
        }
    }
}

/// A typed piece of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text
    Text {
        /// The text
        text: String,
    },
    /// Model reasoning, never consumed as output
    Thinking {
        /// The reasoning text
        thinking: String,
    },
    /// A tool invocation requested by the model
    ToolCall {
        /// Tool name
        name: String,
        /// Tool arguments
        #[serde(default)]
        arguments: serde_json::Value,
    },
}

impl ContentPart {
    /// Text part constructor
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }
}

/// Join the `Text` parts of some content with newlines, or `None` if there are none
pub(crate) fn join_text(parts: &[ContentPart]) -> Option<String> {
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

/// One conversation message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author
    pub role: Role,

    /// Content parts, in order
    pub content: Vec<ContentPart>,

    /// Stop reason of an assistant reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl Message {
    /// A user turn with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentPart::text(text)],
            stop_reason: None,
        }
    }

    /// An assistant turn built from a completion response
    pub fn assistant(response: &CompletionResponse) -> Self {
        Self {
            role: Role::Assistant,
            content: response.content.clone(),
            stop_reason: Some(response.stop_reason),
        }
    }

    /// Text parts joined with newlines; `None` when the message has no text
    pub fn text(&self) -> Option<String> {
        join_text(&self.content)
    }
}

/// What to send to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system_prompt: String,

    /// Conversation turns
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Create a request
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
        }
    }

    /// Text of the last user message, if any
    pub fn last_user_text(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .and_then(Message::text)
    }
}

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Credential for the backend
    pub api_key: Option<String>,

    /// Cancels the call; the backend then reports [`StopReason::Aborted`]
    pub cancel: CancellationToken,
}

impl CompletionOptions {
    /// Options with a credential and a caller-owned cancellation token
    pub fn new(api_key: Option<String>, cancel: CancellationToken) -> Self {
        Self { api_key, cancel }
    }
}

/// A backend reply
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Why generation ended
    pub stop_reason: StopReason,

    /// Generated content
    pub content: Vec<ContentPart>,
}

impl CompletionResponse {
    /// A reply with one text part
    pub fn text_reply(text: impl Into<String>, stop_reason: StopReason) -> Self {
        Self {
            stop_reason,
            content: vec![ContentPart::text(text)],
        }
    }

    /// The reply reported for a cancelled call
    pub fn aborted() -> Self {
        Self {
            stop_reason: StopReason::Aborted,
            content: Vec::new(),
        }
    }

    /// Whether the call was cancelled
    pub fn is_aborted(&self) -> bool {
        self.stop_reason == StopReason::Aborted
    }

    /// Text parts joined with newlines (empty when there is no text)
    pub fn text(&self) -> String {
        join_text(&self.content).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_only_text_parts() {
        let response = CompletionResponse {
            stop_reason: StopReason::Stop,
            content: vec![
                ContentPart::Thinking {
                    thinking: "hmm".into(),
                },
                ContentPart::text("first"),
                ContentPart::ToolCall {
                    name: "x".into(),
                    arguments: serde_json::Value::Null,
                },
                ContentPart::text("second"),
            ],
        };
        assert_eq!(response.text(), "first\nsecond");
    }

    #[test]
    fn test_message_serialization() {
        let message = Message {
            role: Role::Assistant,
            content: vec![ContentPart::text("Which DB?")],
            stop_reason: Some(StopReason::ToolUse),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(
            json,
            r#"{"role":"assistant","content":[{"type":"text","text":"Which DB?"}],"stop_reason":"toolUse"}"#
        );
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_user_message_without_stop_reason() {
        let parsed: Message =
            serde_json::from_str(r#"{"role":"user","content":[{"type":"text","text":"hi"}]}"#)
                .unwrap();
        assert_eq!(parsed.stop_reason, None);
        assert_eq!(parsed.text().as_deref(), Some("hi"));
    }

    #[test]
    fn test_last_user_text() {
        let request = CompletionRequest::new(
            "sys",
            vec![Message::user("one"), Message::user("two")],
        );
        assert_eq!(request.last_user_text().as_deref(), Some("two"));
    }

    #[test]
    fn test_aborted_response() {
        let response = CompletionResponse::aborted();
        assert!(response.is_aborted());
        assert_eq!(response.text(), "");
    }
}
