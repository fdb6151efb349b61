//! Clarify TUI
//!
//! The interactive half of an interview: a sequential collector that walks the
//! operator through one question at a time, the answer editor it embeds, a
//! cancellable loading indicator, and a crossterm host that paints them.
//!
//! # Architecture
//!
//! Views implement [`Component`] (render at a width, invalidate, handle a
//! key). Hosts implement [`InteractiveUi`]: [`TerminalUi`] drives views on a
//! real terminal, [`ScriptedUi`] replays keys for tests.
//!
//! # Example
//!
//! ```
//! use clarify_tui::{Collector, CollectorState, Component, Theme};
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let mut collector = Collector::new(vec!["Which DB?".to_string()], Theme::plain());
//! for ch in "Postgres".chars() {
//!     collector.handle_input(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
//! }
//! collector.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
//! assert_eq!(collector.state(), CollectorState::Completed);
//! assert_eq!(collector.take_outcome().unwrap().answers[0].answer, "Postgres");
//! ```

#![warn(missing_docs)]

pub mod collector;
pub mod component;
pub mod editor;
pub mod error;
pub mod loader;
pub mod terminal;
pub mod text;
pub mod theme;
pub mod ui;

pub use collector::{Collector, CollectorState, HELP_FOOTER};
pub use component::Component;
pub use editor::{AnswerEditor, EditorEvent, LineEditor};
pub use error::TuiError;
pub use loader::Loader;
pub use terminal::{Surface, TerminalUi};
pub use text::{truncate_to_width, visible_width, wrap_text};
pub use theme::Theme;
pub use ui::{keys, InteractiveUi, NotifyLevel, ScriptedUi};
