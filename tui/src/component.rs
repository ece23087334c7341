//! Capability shared by overlay components.

use crossterm::event::Event;
use ratatui::text::Line;

use fzpick_engine::InputOutcome;

/// A self-rendering, focusable piece of UI.
///
/// `render` returns exactly-sized lines for the given width and may cache
/// them; the cache is dropped on input and on `invalidate`.
pub trait Component {
    fn render(&mut self, width: u16) -> &[Line<'static>];

    /// Drop cached output, e.g. after a theme or terminal size change.
    fn invalidate(&mut self);

    fn handle_input(&mut self, event: &Event) -> InputOutcome;

    fn set_focused(&mut self, focused: bool);

    fn is_focused(&self) -> bool;
}
