//! JSON-lines conversation transcripts: one message object per line.

use crate::error::{CliError, Result};
use clarify_llm::Message;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Parse a transcript; blank lines are skipped.
pub fn parse(contents: &str) -> Result<Vec<Message>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| CliError::Transcript {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Load a transcript file.
pub fn load(path: &Path) -> Result<Vec<Message>> {
    parse(&fs::read_to_string(path)?)
}

/// Write `messages` to `path`, replacing its contents.
pub fn save(path: &Path, messages: &[Message]) -> Result<()> {
    let mut out = String::new();
    for message in messages {
        out.push_str(&serde_json::to_string(message)?);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

/// Append one message, creating the file if needed.
pub fn append(path: &Path, message: &Message) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", serde_json::to_string(message)?)?;
    Ok(())
}
