//! MCP tool implementations

mod qna;

pub use qna::{
    handle_qna, render_call, render_result, tool_definition, AnswerDetail, QnaDetails, QnaParams,
    QnaToolResult, QNA_TOOL,
};
