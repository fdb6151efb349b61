//! Command implementations.

pub mod ask;
pub mod chat;
pub mod models;
pub mod qna;

pub use self::ask::execute_ask;
pub use self::chat::ChatSession;
pub use self::models::execute_models;
pub use self::qna::{execute_qna, extract_and_collect};
