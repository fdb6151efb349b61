//! Clarify Domain Layer
//!
//! This crate contains the core data model for the clarification collector.
//! It has ZERO external dependencies and defines the values every other layer
//! exchanges: questions, answers, the outcome of an interview, the canonical
//! result text, and completion models.
//!
//! ## Key Concepts
//!
//! - **Question**: An opaque, order-significant string. Duplicates are legal.
//! - **Answer**: A `(question, answer)` pair whose answer text is never empty
//! - **Outcome**: The record of one interview, complete or cancelled
//! - **Formatter**: A pure mapping from an outcome to canonical text
//! - **Cheap-tier model**: A lower-cost model used for question extraction
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and pure functions only
//! - I/O (terminals, completion backends) lives in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod model;
pub mod outcome;
pub mod question;

// Re-exports for convenience
pub use format::{format_outcome, FormattedResult, CANCELLED_HEADER};
pub use model::{CheapModelTable, Model, CHEAP_TIER_MARKERS};
pub use outcome::{CollectionOutcome, OutcomeError};
pub use question::{normalize_answer, Answer, Question, NOT_ANSWERED, NO_ANSWER};
