//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion backend error
    #[error(transparent)]
    Llm(#[from] clarify_llm::LlmError),

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] clarify_extractor::ExtractorError),

    /// Terminal UI error
    #[error(transparent)]
    Ui(#[from] clarify_tui::TuiError),

    /// Tool invocation error
    #[error(transparent)]
    Tool(#[from] clarify_mcp::McpError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed transcript line
    #[error("Transcript line {line}: {message}")]
    Transcript {
        /// 1-based line number
        line: usize,
        /// Parse failure
        message: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Line editor failure
    #[error("Line editor error: {0}")]
    Readline(String),
}
