//! Crossterm host: paints views inline and feeds them key events

use crate::collector::Collector;
use crate::component::Component;
use crate::error::TuiError;
use crate::loader::Loader;
use crate::theme::Theme;
use crate::ui::{InteractiveUi, NotifyLevel};
use async_trait::async_trait;
use clarify_domain::{CollectionOutcome, Question};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::{cursor, queue, style::Print, terminal};
use futures_util::StreamExt;
use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const SPINNER_INTERVAL: Duration = Duration::from_millis(80);
const FALLBACK_WIDTH: usize = 80;

/// Stream the views are painted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Standard output
    Stdout,
    /// Standard error, for hosts whose stdout carries a protocol
    Stderr,
}

impl Surface {
    fn writer(self) -> Box<dyn Write + Send> {
        match self {
            Surface::Stdout => Box::new(io::stdout()),
            Surface::Stderr => Box::new(io::stderr()),
        }
    }

    fn is_terminal(self) -> bool {
        match self {
            Surface::Stdout => io::stdout().is_terminal(),
            Surface::Stderr => io::stderr().is_terminal(),
        }
    }
}

/// Repaints a block of lines in place below the cursor
struct Painter<W: Write> {
    out: W,
    height: usize,
}

impl<W: Write> Painter<W> {
    fn new(out: W) -> Self {
        Self { out, height: 0 }
    }

    fn rewind(&mut self) -> io::Result<()> {
        if self.height > 0 {
            let up = u16::try_from(self.height).unwrap_or(u16::MAX);
            queue!(self.out, cursor::MoveUp(up))?;
        }
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::FromCursorDown)
        )
    }

    fn paint(&mut self, lines: &[String]) -> io::Result<()> {
        self.rewind()?;
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        self.height = lines.len();
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.rewind()?;
        self.height = 0;
        self.out.flush()
    }
}

/// Raw mode for the lifetime of the guard
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn terminal_width() -> usize {
    terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(FALLBACK_WIDTH)
}

/// Interactive UI on the controlling terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalUi {
    surface: Surface,
    theme: Theme,
}

impl TerminalUi {
    /// Create a terminal UI painting on `surface`
    pub fn new(surface: Surface, theme: Theme) -> Self {
        Self { surface, theme }
    }

    async fn drive<C>(&self, view: &mut C, finished: fn(&C) -> bool) -> Result<(), TuiError>
    where
        C: Component + Send,
    {
        let _raw = RawMode::enable()?;
        let mut painter = Painter::new(self.surface.writer());
        let mut events = EventStream::new();

        painter.paint(&view.render(terminal_width()))?;
        while !finished(view) {
            let event = events.next().await.ok_or(TuiError::InputClosed)??;
            match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => view.handle_input(key),
                Event::Resize(..) => view.invalidate(),
                _ => continue,
            }
            if !finished(view) {
                painter.paint(&view.render(terminal_width()))?;
            }
        }
        painter.clear()?;
        Ok(())
    }
}

#[async_trait]
impl InteractiveUi for TerminalUi {
    fn has_ui(&self) -> bool {
        self.surface.is_terminal()
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        let line = match level {
            NotifyLevel::Info => self.theme.accent(&format!("ℹ {}", message)),
            NotifyLevel::Error => self.theme.error(&format!("✗ {}", message)),
        };
        let mut out = self.surface.writer();
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    async fn collect_answers(
        &mut self,
        questions: &[Question],
    ) -> Result<CollectionOutcome, TuiError> {
        if !self.has_ui() {
            return Err(TuiError::NotInteractive);
        }
        debug!(count = questions.len(), "Starting interview");
        let mut collector = Collector::new(questions.to_vec(), self.theme);
        self.drive(&mut collector, Collector::is_finished).await?;
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
        if !self.has_ui() {
            return Ok(task.await);
        }

        let mut loader = Loader::new(message, cancel.clone(), self.theme);
        let _raw = RawMode::enable()?;
        let mut painter = Painter::new(self.surface.writer());
        let mut events = EventStream::new();
        let mut events_open = true;
        let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
        tokio::pin!(task);

        let output = loop {
            painter.paint(&loader.render(terminal_width()))?;
            tokio::select! {
                output = &mut task => break output,
                event = events.next(), if events_open => match event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        loader.handle_input(key)
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => events_open = false,
                },
                _ = ticker.tick() => loader.tick(),
            }
        };
        painter.clear()?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_writes_lines() {
        let mut painter = Painter::new(Vec::new());
        painter.paint(&["one".to_string(), "two".to_string()]).unwrap();
        let out = String::from_utf8(painter.out.clone()).unwrap();
        assert!(out.contains("one\r\ntwo\r\n"));
        assert_eq!(painter.height, 2);
    }

    #[test]
    fn test_painter_repaints_in_place() {
        let mut painter = Painter::new(Vec::new());
        painter.paint(&["a".to_string(), "b".to_string()]).unwrap();
        painter.out.clear();
        painter.paint(&["c".to_string()]).unwrap();
        let out = String::from_utf8(painter.out.clone()).unwrap();
        assert!(out.starts_with("\x1b[2A"));
        assert!(out.contains("c\r\n"));

        painter.out.clear();
        painter.clear().unwrap();
        let out = String::from_utf8(painter.out.clone()).unwrap();
        assert!(out.starts_with("\x1b[1A"));
        assert_eq!(painter.height, 0);
    }

    #[test]
    fn test_first_paint_does_not_move_up() {
        let mut painter = Painter::new(Vec::new());
        painter.paint(&["x".to_string()]).unwrap();
        let out = String::from_utf8(painter.out.clone()).unwrap();
        assert!(!out.contains("A\x1b"));
        assert!(!out.starts_with("\x1b[1A"));
    }
}
