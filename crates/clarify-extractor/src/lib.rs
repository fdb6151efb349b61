//! Clarify Extractor
//!
//! Finds the clarification questions embedded in a conversational reply.
//!
//! # Overview
//!
//! Extraction is the command-path front half of an interview: the last
//! assistant reply is sent to a completion backend with a fixed instruction,
//! and the line-oriented answer becomes the question list handed to the
//! collector.
//!
//! # Architecture
//!
//! ```text
//! Conversation → last_assistant_text → select_extraction_model
//!              → QuestionExtractor → backend → parse → ExtractionResult
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use clarify_domain::Model;
//! use clarify_extractor::{ExtractionResult, ExtractorConfig, QuestionExtractor};
//! use clarify_llm::MockBackend;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = QuestionExtractor::new(
//!     MockBackend::new("Which database?"),
//!     ExtractorConfig::default(),
//! );
//!
//! let cancel = CancellationToken::new();
//! let model = Model::new("mock", "m");
//! match extractor.extract("Which database?", &model, None, &cancel).await? {
//!     ExtractionResult::Questions(q) => println!("{} question(s)", q.len()),
//!     ExtractionResult::NoQuestions => println!("No questions"),
//!     ExtractionResult::Aborted => println!("Cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod selector;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::QuestionExtractor;
pub use parser::{parse_extraction_response, NO_QUESTIONS_SENTINEL};
pub use prompt::{build_request, EXTRACTION_SYSTEM_PROMPT};
pub use selector::select_extraction_model;
pub use source::last_assistant_text;
pub use types::ExtractionResult;
