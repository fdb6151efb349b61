//! Clarify MCP Server
//!
//! Model Context Protocol server that lets an AI client interview the operator.
//!
//! Provides one MCP tool:
//! - `qna` - Ask a series of questions one at a time and return the answers
//!
//! The interview is painted on stderr and reads keys from the controlling
//! terminal; stdout carries protocol frames only.
//!
//! # Example
//!
//! ```no_run
//! use clarify_mcp::McpServer;
//! use clarify_tui::{Surface, TerminalUi, Theme};
//!
//! let ui = TerminalUi::new(Surface::Stderr, Theme::default());
//! let mut server = McpServer::new(ui).unwrap();
//! server.run().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod protocol;
mod server;
mod tools;

pub use config::ServerConfig;
pub use error::McpError;
pub use protocol::{ToolContent, PROTOCOL_VERSION};
pub use server::McpServer;
pub use tools::{
    handle_qna, render_call, render_result, AnswerDetail, QnaDetails, QnaParams, QnaToolResult,
    QNA_TOOL,
};
