//! Clarify CLI - Answer an assistant's clarifying questions one at a time.

use clap::Parser;
use clarify_cli::commands::{self, ChatSession};
use clarify_cli::{repl, Cli, Command, Config, Formatter};
use clarify_tui::{Surface, TerminalUi, Theme};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> clarify_cli::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let model = config.active_model(cli.model.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.ui.format);
    let color_enabled = !cli.no_color && config.ui.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Ask(args)) => commands::execute_ask(args, &formatter).await?,
        Some(Command::Qna(args)) => commands::execute_qna(args, &config, model, &formatter).await?,
        Some(Command::Models) => {
            commands::execute_models(&config, model.as_ref(), &formatter).await?
        }
        Some(Command::Chat(args)) => run_chat(&config, model, args.transcript, &formatter).await?,
        None => run_chat(&config, model, None, &formatter).await?,
    }

    Ok(())
}

async fn run_chat(
    config: &Config,
    model: Option<clarify_domain::Model>,
    transcript: Option<std::path::PathBuf>,
    formatter: &Formatter,
) -> clarify_cli::Result<()> {
    let mut session = ChatSession::new(
        config.router(),
        config.registry(),
        config.extractor.clone(),
        model,
    );
    if let Some(path) = transcript {
        session = session.with_transcript(path)?;
    }
    let mut ui = TerminalUi::new(Surface::Stdout, Theme::new(formatter.color_enabled()));
    repl::run_repl(&mut session, &mut ui, formatter, config.ui.history_size).await
}
