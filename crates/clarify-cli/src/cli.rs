//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clarify CLI - Answer an assistant's clarifying questions one at a time.
#[derive(Debug, Parser)]
#[command(name = "clarify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Active model as provider/id
    #[arg(short, long, global = true, env = "CLARIFY_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Formatted transcript (default)
    Text,
    /// JSON with full interview details
    Json,
    /// Table format
    Table,
    /// Quiet format (one-line summaries)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask questions directly and print the answers
    Ask(AskArgs),

    /// Extract questions from the last assistant message of a transcript and answer them
    Qna(QnaArgs),

    /// Chat with the active model; /qna answers its questions
    Chat(ChatArgs),

    /// List configured models
    Models,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Questions, asked in order
    pub questions: Vec<String>,

    /// Read questions from a file (one per line)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the qna command.
#[derive(Debug, Parser)]
pub struct QnaArgs {
    /// Conversation transcript (JSON lines); answers are appended to it
    pub transcript: Option<PathBuf>,

    /// Read the transcript from stdin and print the answers
    #[arg(long, conflicts_with = "transcript")]
    pub stdin: bool,

    /// Print the answers instead of appending them
    #[arg(long)]
    pub print: bool,
}

/// Arguments for the chat command.
#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Transcript to resume and append to
    pub transcript: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["clarify"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_command() {
        let cli = Cli::try_parse_from(["clarify", "ask", "Which DB?", "Use TypeScript?"]).unwrap();
        match cli.command {
            Some(Command::Ask(args)) => assert_eq!(args.questions.len(), 2),
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_qna_stdin_conflicts_with_path() {
        assert!(Cli::try_parse_from(["clarify", "qna", "t.jsonl", "--stdin"]).is_err());
        let cli = Cli::try_parse_from(["clarify", "qna", "--stdin"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Qna(QnaArgs { stdin: true, .. }))));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "clarify",
            "models",
            "--format",
            "json",
            "--no-color",
            "--model",
            "openai/gpt-4o",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        assert_eq!(cli.model.as_deref(), Some("openai/gpt-4o"));
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Table.into();
        assert_eq!(format, OutputFormat::Table);
    }
}
