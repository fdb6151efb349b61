//! Error types for the terminal UI

use thiserror::Error;

/// Errors raised while driving the terminal
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal I/O failure
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// No interactive terminal is attached
    #[error("UI not available (running in non-interactive mode)")]
    NotInteractive,

    /// The key event stream ended before the view finished
    #[error("Input closed before the interview finished")]
    InputClosed,
}
