//! The pull-based view contract between a host loop and a view

use crossterm::event::KeyEvent;

/// A view driven by a host loop
///
/// The host asks for lines at its current width, forwards keys, and calls
/// `invalidate` when something outside the view changed (e.g. a resize).
pub trait Component {
    /// Lines to paint at `width` columns; each line fits within `width`
    fn render(&mut self, width: usize) -> Vec<String>;

    /// Drop any cached rendering
    fn invalidate(&mut self);

    /// React to one key event
    fn handle_input(&mut self, key: KeyEvent);
}
