//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clarify_mcp::{render_result, QnaToolResult};
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One row of the models listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRow {
    /// Provider name
    pub provider: String,
    /// Model id
    pub id: String,
    /// The active model
    pub active: bool,
    /// The provider's cheap extraction model
    pub extraction: bool,
    /// A credential resolves for the model
    pub credential: bool,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether styles are emitted.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Format the result of an interview.
    pub fn format_result(&self, result: &QnaToolResult) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(result.text().to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(render_result(result)),
        }
    }

    fn format_result_table(&self, result: &QnaToolResult) -> String {
        let Some(details) = &result.details else {
            return result.text().to_string();
        };

        let mut builder = Builder::default();
        builder.push_record(["#", "Question", "Answer"]);
        for (i, question) in details.questions.iter().enumerate() {
            let answer = details
                .answers
                .get(i)
                .map(|a| a.answer.as_str())
                .unwrap_or(clarify_domain::NOT_ANSWERED);
            builder.push_record([(i + 1).to_string(), question.clone(), answer.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        if details.cancelled {
            format!("{}\n{}", self.warning("Cancelled"), table)
        } else {
            table.to_string()
        }
    }

    /// Format the models listing.
    pub fn format_models(&self, rows: &[ModelRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|r| format!("{}/{}", r.provider, r.id))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Text | OutputFormat::Table => Ok(self.format_models_table(rows)),
        }
    }

    fn format_models_table(&self, rows: &[ModelRow]) -> String {
        if rows.is_empty() {
            return self.colorize("No models configured.", "yellow");
        }

        let mark = |flag: bool| if flag { "✓" } else { "" };
        let mut builder = Builder::default();
        builder.push_record(["Provider", "Model", "Active", "Extraction", "Credential"]);
        for row in rows {
            builder.push_record([
                row.provider.as_str(),
                row.id.as_str(),
                mark(row.active),
                mark(row.extraction),
                if row.credential { "ok" } else { "missing" },
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a chat reply.
    pub fn reply(&self, model_id: &str, text: &str) -> String {
        format!("{} {}", self.colorize(&format!("{}:", model_id), "cyan"), text)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
