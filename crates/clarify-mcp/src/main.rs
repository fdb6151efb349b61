//! Clarify MCP Server - Main entry point

use clarify_mcp::{McpServer, ServerConfig};
use clarify_tui::{Surface, TerminalUi, Theme};
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr; stdout carries protocol frames
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let ui = TerminalUi::new(Surface::Stderr, Theme::new(config.color));
    let mut server = match McpServer::new(ui) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to create MCP server: {}", e);
            std::process::exit(1);
        }
    };

    // Run server (blocks until stdin closes)
    if let Err(e) = server.run() {
        eprintln!("MCP server error: {}", e);
        std::process::exit(1);
    }
}
