//! Colors for the interview views

use colored::Colorize;

/// Named styles used by the views; a no-op when color is disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color_enabled: bool,
}

impl Theme {
    /// Create a theme
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// A theme that never emits escape sequences
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Whether styles produce escape sequences
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Borders and rules
    pub fn accent(&self, text: &str) -> String {
        self.colorize(text, "accent")
    }

    /// Secondary labels
    pub fn muted(&self, text: &str) -> String {
        self.colorize(text, "muted")
    }

    /// Hints and history
    pub fn dim(&self, text: &str) -> String {
        self.colorize(text, "dim")
    }

    /// Emphasized text
    pub fn bold(&self, text: &str) -> String {
        self.colorize(text, "bold")
    }

    /// Failures
    pub fn error(&self, text: &str) -> String {
        self.colorize(text, "error")
    }

    fn colorize(&self, text: &str, style: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match style {
            "accent" => text.cyan().to_string(),
            "muted" => text.bright_black().to_string(),
            "dim" => text.dimmed().to_string(),
            "bold" => text.bold().to_string(),
            "error" => text.red().to_string(),
            _ => text.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}
