//! Interactive chat REPL.

use crate::commands::ChatSession;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clarify_domain::Model;
use clarify_llm::{CompletionBackend, ModelRegistry};
use clarify_tui::InteractiveUi;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the chat REPL until /exit or end of input.
pub async fn run_repl<B, R, U>(
    session: &mut ChatSession<B, R>,
    ui: &mut U,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    B: CompletionBackend + Clone,
    R: ModelRegistry,
    U: InteractiveUi,
{
    println!(
        "{}",
        formatter.info("Clarify chat - Type /help for commands, /exit to quit")
    );
    if let Some(model) = session.model() {
        println!("{}", formatter.info(&format!("Model: {}", model)));
    }
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(|e| CliError::Readline(e.to_string()))?
        .build();
    let mut editor =
        DefaultEditor::with_config(editor_config).map_err(|e| CliError::Readline(e.to_string()))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => break,
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(command) => {
                        if let Err(e) = execute_repl_command(command, session, ui, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use /exit to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Qna,
    Model(Option<String>),
    Say(String),
}

/// Parse a REPL line; anything not starting with `/` is a chat message.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    if !line.starts_with('/') {
        return Ok(ReplCommand::Say(line.to_string()));
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    match command {
        "/exit" | "/quit" | "/q" => Ok(ReplCommand::Exit),
        "/help" | "/?" => Ok(ReplCommand::Help),
        "/qna" => Ok(ReplCommand::Qna),
        "/model" => Ok(ReplCommand::Model(parts.next().map(String::from))),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type /help for available commands.",
            command
        ))),
    }
}

async fn execute_repl_command<B, R, U>(
    command: ReplCommand,
    session: &mut ChatSession<B, R>,
    ui: &mut U,
    formatter: &Formatter,
) -> Result<()>
where
    B: CompletionBackend + Clone,
    R: ModelRegistry,
    U: InteractiveUi,
{
    match command {
        ReplCommand::Say(text) => send_and_print(session, ui, formatter, &text).await?,
        ReplCommand::Qna => {
            if let Some(answers) = session.collect_answers(ui).await? {
                println!("{}", answers);
                send_and_print(session, ui, formatter, &answers).await?;
            }
        }
        ReplCommand::Model(None) => match session.model() {
            Some(model) => println!("{}", formatter.info(&format!("Model: {}", model))),
            None => println!("{}", formatter.warning("No model selected")),
        },
        ReplCommand::Model(Some(reference)) => {
            let model = Model::parse(&reference).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Invalid model '{}'. Expected 'provider/id'",
                    reference
                ))
            })?;
            let model = session
                .registry()
                .find(&model.provider, &model.id)
                .ok_or_else(|| CliError::Config(format!("Model '{}' is not configured", model)))?;
            println!("{}", formatter.success(&format!("Model: {}", model)));
            session.set_model(model);
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }
    Ok(())
}

async fn send_and_print<B, R, U>(
    session: &mut ChatSession<B, R>,
    ui: &mut U,
    formatter: &Formatter,
    text: &str,
) -> Result<()>
where
    B: CompletionBackend + Clone,
    R: ModelRegistry,
    U: InteractiveUi,
{
    if let Some(reply) = session.send(ui, text).await? {
        let label = session.model().map(|m| m.id.clone()).unwrap_or_default();
        println!("{}", formatter.reply(&label, &reply));
        println!();
    }
    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let clarify_dir = home.join(".clarify");
    std::fs::create_dir_all(&clarify_dir)?;
    Ok(clarify_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <message>             - Send a message to the model");
    println!("  /qna                  - Answer the questions in the last reply, one at a time");
    println!("  /model [provider/id]  - Show or switch the active model");
    println!("  /help, /?             - Show this help");
    println!("  /exit, /quit, /q      - Exit chat");
    println!();
}
