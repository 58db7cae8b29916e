//! Yes/no dialog guarding destructive actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use netpala_core::Handle;

use crate::component::Component;
use crate::theme;
use crate::widgets::centered_rect;

/// Confirmation for forgetting a saved profile. Defaults to Cancel.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    /// Saved profile to delete when confirmed.
    pub target: Handle,
    pub message: String,
    confirm: bool,
}

impl ConfirmDialog {
    pub fn delete_known(target: Handle, ssid: &str) -> Self {
        Self {
            target,
            message: format!("Are you sure you want to delete the known network '{ssid}'?"),
            confirm: false,
        }
    }

    #[cfg(test)]
    pub fn confirm_selected(&self) -> bool {
        self.confirm
    }
}

impl Component for ConfirmDialog {
    /// `true` when the operator confirmed.
    type Outcome = bool;

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Enter => Some(self.confirm),
            KeyCode::Esc => Some(false),
            KeyCode::Right | KeyCode::Tab => {
                self.confirm = true;
                None
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.confirm = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let panel = centered_rect(52, 9, area);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [message_area, buttons_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(theme::table_row())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            message_area,
        );

        let [cancel_area, confirm_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(buttons_area);
        render_button(frame, cancel_area, "Cancel", !self.confirm);
        render_button(frame, confirm_area, "Confirm", self.confirm);
    }
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, active: bool) {
    let (border, text) = if active {
        (Style::default().fg(theme::AMBER), theme::title_style())
    } else {
        (theme::border_default(), theme::table_row())
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, text)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border),
            ),
        area,
    );
}
