//! The sequential interview state machine
//!
//! One question is shown at a time. Enter records the answer and advances;
//! Esc ends the interview, keeping every answer given so far. Each transition
//! completes synchronously inside a single `handle_input` call, so a render
//! never observes a half-applied state.

use crate::component::Component;
use crate::editor::{AnswerEditor, EditorEvent, LineEditor};
use crate::text::{truncate_to_width, wrap_text};
use crate::theme::Theme;
use clarify_domain::{Answer, CollectionOutcome, Question};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Footer shown under the answer editor
pub const HELP_FOOTER: &str = " Enter to submit answer • Esc to cancel all";

/// Where the interview is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Showing the question at this index
    Active(usize),
    /// Every question answered
    Completed,
    /// Cancelled while the question at this index was shown
    Cancelled(usize),
}

/// Interactive collector for one interview
///
/// Single-shot: once `Completed` or `Cancelled`, further input is ignored.
#[derive(Debug)]
pub struct Collector<E = LineEditor> {
    questions: Vec<Question>,
    answers: Vec<Answer>,
    state: CollectorState,
    editor: E,
    theme: Theme,
    cache: Option<(usize, Vec<String>)>,
    outcome: Option<CollectionOutcome>,
}

impl Collector<LineEditor> {
    /// Create a collector with the built-in line editor
    pub fn new(questions: Vec<Question>, theme: Theme) -> Self {
        Self::with_editor(questions, LineEditor::new(theme), theme)
    }
}

impl<E: AnswerEditor> Collector<E> {
    /// Create a collector around any answer editor
    ///
    /// Callers must not pass an empty list; if they do, the collector starts
    /// already `Completed` with an empty outcome.
    pub fn with_editor(questions: Vec<Question>, editor: E, theme: Theme) -> Self {
        let mut collector = Self {
            questions,
            answers: Vec::new(),
            state: CollectorState::Active(0),
            editor,
            theme,
            cache: None,
            outcome: None,
        };
        if collector.questions.is_empty() {
            collector.finish(CollectorState::Completed);
        }
        collector
    }

    /// Current state
    pub fn state(&self) -> CollectorState {
        self.state
    }

    /// Answers recorded so far, in submission order
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Whether the interview reached a terminal state
    pub fn is_finished(&self) -> bool {
        !matches!(self.state, CollectorState::Active(_))
    }

    /// The answer editor
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Take the final outcome; `None` while active or once taken
    pub fn take_outcome(&mut self) -> Option<CollectionOutcome> {
        self.outcome.take()
    }

    /// Record `raw` as the answer to the current question and advance
    pub fn submit(&mut self, raw: &str) {
        let CollectorState::Active(index) = self.state else {
            return;
        };
        self.answers.push(Answer::new(self.questions[index].clone(), raw));
        self.editor.set_text("");
        debug!(index, "Answer recorded");

        if index + 1 == self.questions.len() {
            self.finish(CollectorState::Completed);
        } else {
            self.state = CollectorState::Active(index + 1);
        }
        self.invalidate();
    }

    /// Cancel the interview at the current question
    pub fn cancel(&mut self) {
        if let CollectorState::Active(index) = self.state {
            debug!(index, "Interview cancelled");
            self.finish(CollectorState::Cancelled(index));
            self.invalidate();
        }
    }

    fn finish(&mut self, state: CollectorState) {
        self.state = state;
        let questions = self.questions.clone();
        let answers = self.answers.clone();
        self.outcome = Some(match state {
            CollectorState::Cancelled(index) => {
                CollectionOutcome::cancelled(questions, answers, index)
            }
            _ => CollectionOutcome::completed(questions, answers),
        });
    }

    fn build_lines(&self, index: usize, width: usize) -> Vec<String> {
        let theme = &self.theme;
        let fit = |text: &str| truncate_to_width(text, width);
        let mut lines = Vec::new();

        lines.push(theme.accent(&"─".repeat(width)));
        lines.push(theme.muted(&fit(&format!(
            " Question {} of {}",
            index + 1,
            self.questions.len()
        ))));
        lines.push(String::new());

        if !self.answers.is_empty() {
            lines.push(theme.dim(&fit(" Previous answers:")));
            for answer in &self.answers {
                let short = truncate_to_width(&answer.answer, width.saturating_sub(10));
                lines.push(theme.dim(&fit(&format!("   • {}", short))));
            }
            lines.push(String::new());
        }

        for line in wrap_text(&self.questions[index], width.saturating_sub(2)) {
            lines.push(theme.bold(&fit(&format!(" {}", line))));
        }
        lines.push(String::new());

        lines.push(theme.muted(&fit(" Your answer:")));
        // The editor clamps to one column, so frames under 3 columns drop the prefix
        let inner = width.saturating_sub(2);
        for line in self.editor.render(inner) {
            lines.push(match (inner, width) {
                (0, 0) => String::new(),
                (0, _) => line,
                _ => format!(" {}", line),
            });
        }

        lines.push(String::new());
        lines.push(theme.dim(&fit(HELP_FOOTER)));
        lines.push(theme.accent(&"─".repeat(width)));
        lines
    }
}

impl<E: AnswerEditor> Component for Collector<E> {
    fn render(&mut self, width: usize) -> Vec<String> {
        let CollectorState::Active(index) = self.state else {
            return Vec::new();
        };
        if let Some((cached_width, lines)) = &self.cache {
            if *cached_width == width {
                return lines.clone();
            }
        }
        let lines = self.build_lines(index, width);
        self.cache = Some((width, lines.clone()));
        lines
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if self.is_finished() {
            return;
        }
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            self.cancel();
            return;
        }
        if let EditorEvent::Submitted(text) = self.editor.handle_key(key) {
            self.submit(&text);
        }
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_domain::NO_ANSWER;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_and_enter(collector: &mut Collector, text: &str) {
        for ch in text.chars() {
            collector.handle_input(key(KeyCode::Char(ch)));
        }
        collector.handle_input(key(KeyCode::Enter));
    }

    fn questions(items: &[&str]) -> Vec<Question> {
        items.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_full_interview() {
        let mut collector = Collector::new(questions(&["A?", "B?"]), Theme::plain());
        assert_eq!(collector.state(), CollectorState::Active(0));

        type_and_enter(&mut collector, "  yes ");
        assert_eq!(collector.state(), CollectorState::Active(1));
        assert_eq!(collector.editor().text(), "");

        type_and_enter(&mut collector, "");
        assert_eq!(collector.state(), CollectorState::Completed);

        let outcome = collector.take_outcome().unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(outcome.cancelled_at_index(), -1);
        assert_eq!(outcome.answers[0], Answer::new("A?", "yes"));
        assert_eq!(outcome.answers[1].answer, NO_ANSWER);
        assert!(outcome.validate().is_ok());
        assert!(collector.take_outcome().is_none());
    }

    #[test]
    fn test_cancel_keeps_prior_answers() {
        let mut collector = Collector::new(questions(&["A?", "B?", "C?"]), Theme::plain());
        type_and_enter(&mut collector, "x");
        collector.handle_input(key(KeyCode::Char('p')));
        collector.handle_input(key(KeyCode::Esc));

        assert_eq!(collector.state(), CollectorState::Cancelled(1));
        let outcome = collector.take_outcome().unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.cancelled_at_index(), 1);
        assert_eq!(outcome.answers, vec![Answer::new("A?", "x")]);
        assert!(outcome.validate().is_ok());
    }

    #[test]
    fn test_cancel_at_first_question() {
        let mut collector = Collector::new(questions(&["A?"]), Theme::plain());
        collector.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let outcome = collector.take_outcome().unwrap();
        assert_eq!(outcome.cancelled_at_index(), 0);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn test_terminal_states_ignore_input() {
        let mut collector = Collector::new(questions(&["A?"]), Theme::plain());
        collector.handle_input(key(KeyCode::Esc));
        type_and_enter(&mut collector, "late");
        collector.submit("later");
        assert_eq!(collector.state(), CollectorState::Cancelled(0));
        assert!(collector.answers().is_empty());
    }

    #[test]
    fn test_empty_question_list_is_completed() {
        let mut collector = Collector::new(Vec::new(), Theme::plain());
        assert_eq!(collector.state(), CollectorState::Completed);
        assert!(collector.render(40).is_empty());
        let outcome = collector.take_outcome().unwrap();
        assert!(!outcome.cancelled);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn test_repeated_questions_tracked_by_position() {
        let mut collector = Collector::new(questions(&["Same?", "Same?"]), Theme::plain());
        type_and_enter(&mut collector, "first");
        type_and_enter(&mut collector, "second");
        let outcome = collector.take_outcome().unwrap();
        assert_eq!(outcome.answers[0].answer, "first");
        assert_eq!(outcome.answers[1].answer, "second");
    }

    #[test]
    fn test_render_layout() {
        let mut collector = Collector::new(questions(&["Which DB?", "Use TypeScript?"]), Theme::plain());
        type_and_enter(&mut collector, "Postgres");
        let lines = collector.render(30);
        assert_eq!(
            lines,
            vec![
                "─".repeat(30),
                " Question 2 of 2".to_string(),
                String::new(),
                " Previous answers:".to_string(),
                "   • Postgres".to_string(),
                String::new(),
                " Use TypeScript?".to_string(),
                String::new(),
                " Your answer:".to_string(),
                format!(" {}", "─".repeat(28)),
                " ▌".to_string(),
                format!(" {}", "─".repeat(28)),
                String::new(),
                " Enter to submit answer • Esc…".to_string(),
                "─".repeat(30),
            ]
        );
    }

    #[test]
    fn test_render_is_memoized_per_width() {
        let mut collector = Collector::new(questions(&["A?"]), Theme::plain());
        let first = collector.render(40);
        assert_eq!(collector.render(40), first);
        collector.handle_input(key(KeyCode::Char('z')));
        let edited = collector.render(40);
        assert_ne!(edited, first);
        assert!(edited.iter().any(|l| l.contains("z▌")));
        assert_eq!(collector.render(20).len(), edited.len());
    }

    #[test]
    fn test_render_fits_width() {
        let long = "word ".repeat(40);
        let mut collector = Collector::new(vec![long.clone(), "next".into()], Theme::plain());
        type_and_enter(&mut collector, &"answer ".repeat(20));
        collector.handle_input(key(KeyCode::Char('数')));
        for width in [0, 1, 2, 3, 24] {
            for line in collector.render(width) {
                assert!(crate::text::visible_width(&line) <= width, "{width}: {line:?}");
            }
        }
    }
}
