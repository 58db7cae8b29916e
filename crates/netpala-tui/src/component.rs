//! Component trait: the contract shared by the modal sub-dialogs.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

/// A self-contained input widget.
///
/// Each key is either absorbed (editing, focus movement) or finishes the
/// interaction with an `Outcome` the caller acts on. Components never
/// touch the entity snapshot or issue commands themselves.
pub trait Component {
    type Outcome;

    /// Handle a keyboard event. Return an outcome once the interaction ends.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Self::Outcome>;

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
