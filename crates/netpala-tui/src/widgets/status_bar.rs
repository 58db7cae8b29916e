//! Bottom line: the password prompt while typing, key hints otherwise.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::component::Component;
use crate::state::{BoxId, Modal, Model};
use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, model: &Model) {
    if let Some(prompt) = &model.prompt {
        prompt.render(frame, area);
        return;
    }
    frame.render_widget(Paragraph::new(hints(model)), area);
}

fn hints(model: &Model) -> Line<'static> {
    let pairs: &[(&str, &str)] = match &model.modal {
        Modal::CredentialForm(_) => &[("tab", "next field"), ("esc", "cancel")],
        Modal::ConfirmDialog(_) => &[("←/→", "choose"), ("↵", "submit"), ("esc", "cancel")],
        Modal::Browse if model.nav.selected_box == BoxId::Known => &[
            ("r", "scan networks"),
            ("↵/space", "select row"),
            ("del", "forget"),
            ("q", "quit"),
        ],
        Modal::Browse => &[
            ("r", "scan networks"),
            ("↵/space", "select row"),
            ("tab", "next box"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(format!("{label}  "), theme::key_hint()));
    }
    Line::from(spans)
}
