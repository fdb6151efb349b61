//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clarify_mcp::{handle_qna, render_call, QnaParams};
use clarify_tui::{InteractiveUi, Surface, TerminalUi, Theme};
use std::fs;
use tracing::debug;

/// Execute the ask command.
pub async fn execute_ask(args: AskArgs, formatter: &Formatter) -> Result<()> {
    let params = QnaParams {
        questions: collect_questions(args)?,
    };
    let mut ui = TerminalUi::new(Surface::Stderr, Theme::new(formatter.color_enabled()));
    let output = ask_with(&mut ui, params, formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Run the interview through `ui` and format the result.
pub async fn ask_with<U: InteractiveUi>(
    ui: &mut U,
    params: QnaParams,
    formatter: &Formatter,
) -> Result<String> {
    debug!("{}", render_call(&params));
    let result = handle_qna(ui, params).await?;
    if result.is_error {
        return Err(CliError::InvalidInput(
            result.text().trim_start_matches("Error: ").to_string(),
        ));
    }
    formatter.format_result(&result)
}

/// Questions from the command line, then from `--file` (one per line)
fn collect_questions(args: AskArgs) -> Result<Vec<String>> {
    let mut questions = args.questions;
    if let Some(path) = args.file {
        let contents = fs::read_to_string(path)?;
        questions.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    Ok(questions)
}
