//! The host-facing UI capability and a scripted implementation for tests

use crate::collector::Collector;
use crate::component::Component;
use crate::error::TuiError;
use crate::loader::Loader;
use crate::theme::Theme;
use async_trait::async_trait;
use clarify_domain::{CollectionOutcome, Question};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Severity of a short operator notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// The requested action did not happen
    Error,
}

/// What the interview flows need from a host UI
#[async_trait]
pub trait InteractiveUi: Send {
    /// Whether an interactive surface is attached
    fn has_ui(&self) -> bool;

    /// Show a short notification
    fn notify(&mut self, level: NotifyLevel, message: &str);

    /// Run one interview over `questions`
    ///
    /// Callers reject empty question lists before calling.
    async fn collect_answers(
        &mut self,
        questions: &[Question],
    ) -> Result<CollectionOutcome, TuiError>;

    /// Await `task` behind a loading indicator whose abort affordance cancels `cancel`
    async fn run_with_loader<F, T>(
        &mut self,
        message: &str,
        cancel: &CancellationToken,
        task: F,
    ) -> Result<T, TuiError>
    where
        F: Future<Output = T> + Send,
        T: Send;
}

/// Key event builders for scripting interviews
pub mod keys {
    use super::*;

    /// One key with no modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Enter
    pub fn enter() -> KeyEvent {
        key(KeyCode::Enter)
    }

    /// Escape
    pub fn escape() -> KeyEvent {
        key(KeyCode::Esc)
    }

    /// One key per character of `text`
    pub fn type_text(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
    }

    /// Type `answer`, then press Enter
    pub fn answer(answer: &str) -> Vec<KeyEvent> {
        let mut events = type_text(answer);
        events.push(enter());
        events
    }
}

/// A UI that replays scripted keys through the real collector
///
/// Clones share the notification and frame logs, so a test can keep a clone
/// while handing the UI to the code under test.
#[derive(Debug, Clone)]
pub struct ScriptedUi {
    interactive: bool,
    keys: VecDeque<KeyEvent>,
    abort_loader: bool,
    width: usize,
    notifications: Arc<Mutex<Vec<(NotifyLevel, String)>>>,
    frames: Arc<Mutex<Vec<Vec<String>>>>,
    loader_messages: Arc<Mutex<Vec<String>>>,
}

impl ScriptedUi {
    /// An interactive UI with no scripted keys
    pub fn new() -> Self {
        Self {
            interactive: true,
            keys: VecDeque::new(),
            abort_loader: false,
            width: 60,
            notifications: Arc::new(Mutex::new(Vec::new())),
            frames: Arc::new(Mutex::new(Vec::new())),
            loader_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A UI that reports no interactive surface
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }

    /// Answer each question in turn
    pub fn answering(answers: &[&str]) -> Self {
        Self::new().with_keys(answers.iter().flat_map(|a| keys::answer(a)))
    }

    /// Append keys to the script
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Press Esc on the loader before awaiting the task
    pub fn aborting_loader(mut self) -> Self {
        self.abort_loader = true;
        self
    }

    /// Notifications shown so far
    pub fn notifications(&self) -> Vec<(NotifyLevel, String)> {
        self.notifications.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Every frame the collector rendered, in order
    pub fn frames(&self) -> Vec<Vec<String>> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Messages of every loader shown
    pub fn loader_messages(&self) -> Vec<String> {
        self.loader_messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn record_frame(&self, lines: Vec<String>) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(lines);
        }
    }
}

impl Default for ScriptedUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InteractiveUi for ScriptedUi {
    fn has_ui(&self) -> bool {
        self.interactive
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push((level, message.to_string()));
        }
    }

    async fn collect_answers(
        &mut self,
        questions: &[Question],
    ) -> Result<CollectionOutcome, TuiError> {
        if !self.interactive {
            return Err(TuiError::NotInteractive);
        }
        let mut collector = Collector::new(questions.to_vec(), Theme::plain());
        while !collector.is_finished() {
            self.record_frame(collector.render(self.width));
            let key = self.keys.pop_front().ok_or(TuiError::InputClosed)?;
            collector.handle_input(key);
        }
        collector.take_outcome().ok_or(TuiError::InputClosed)
    }

    async fn run_with_loader<F, T>(
        &mut self,
        message: &str,
        cancel: &CancellationToken,
        task: F,
    ) -> Result<T, TuiError>
    where
        F: Future<Output = T> + Send,
        T: Send,
    {
        if let Ok(mut messages) = self.loader_messages.lock() {
            messages.push(message.to_string());
        }
        let mut loader = Loader::new(message, cancel.clone(), Theme::plain());
        if self.abort_loader {
            loader.handle_input(keys::escape());
        }
        Ok(task.await)
    }
}
