//! Bordered spinner shown while a background call is pending

use crate::component::Component;
use crate::text::truncate_to_width;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio_util::sync::CancellationToken;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Loading indicator that owns the abort affordance
///
/// Esc (or Ctrl+C) cancels the token handed in at construction; whoever runs
/// the pending call observes the same token.
#[derive(Debug)]
pub struct Loader {
    message: String,
    cancel: CancellationToken,
    frame: usize,
    theme: Theme,
}

impl Loader {
    /// Create a loader for `message` bound to `cancel`
    pub fn new(message: impl Into<String>, cancel: CancellationToken, theme: Theme) -> Self {
        Self {
            message: message.into(),
            cancel,
            frame: 0,
            theme,
        }
    }

    /// Advance the spinner
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Whether the operator aborted
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Component for Loader {
    fn render(&mut self, width: usize) -> Vec<String> {
        let rule = self.theme.accent(&"─".repeat(width));
        let status = if self.is_cancelled() {
            " Cancelling...".to_string()
        } else {
            format!(" {} {}", FRAMES[self.frame], self.message)
        };
        vec![
            rule.clone(),
            truncate_to_width(&status, width),
            self.theme.dim(&truncate_to_width(" Esc to cancel", width)),
            rule,
        ]
    }

    fn invalidate(&mut self) {}

    fn handle_input(&mut self, key: KeyEvent) {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            self.cancel.cancel();
        }
    }
}
