//! Terminal error state. Replaces the dashboard until the operator quits.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            format!("An error occurred: {message}"),
            theme::error_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press 'q' to quit.", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}
