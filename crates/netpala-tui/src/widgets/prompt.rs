//! Single-line passphrase prompt shown in the status bar.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use secrecy::SecretString;

use crate::component::Component;
use crate::theme;

const PLACEHOLDER: &str = "Enter Wi-Fi Password...";

#[derive(Debug)]
pub enum PromptOutcome {
    Submit(SecretString),
    Cancel,
}

/// Passphrase entry for a PSK/SAE network. Typed characters are masked.
#[derive(Default)]
pub struct PasswordPrompt {
    input: String,
}

impl fmt::Debug for PasswordPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPrompt")
            .field("len", &self.input.chars().count())
            .finish()
    }
}

impl PasswordPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.input.chars().count()
    }
}

impl Component for PasswordPrompt {
    type Outcome = PromptOutcome;

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        match key.code {
            KeyCode::Enter => Some(PromptOutcome::Submit(SecretString::from(
                std::mem::take(&mut self.input),
            ))),
            KeyCode::Esc => {
                self.input.clear();
                Some(PromptOutcome::Cancel)
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled(" > ", theme::key_hint_key()),
                Span::styled(PLACEHOLDER, theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" > ", theme::key_hint_key()),
                Span::styled("*".repeat(self.input.chars().count()), theme::table_row()),
                Span::styled("\u{2588}", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use secrecy::ExposeSecret;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typed_characters_are_submitted() {
        let mut prompt = PasswordPrompt::new();
        for c in "hunter22".chars() {
            assert!(prompt.handle_key_event(key(KeyCode::Char(c))).is_none());
        }
        prompt.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(prompt.len(), 7);

        match prompt.handle_key_event(key(KeyCode::Enter)) {
            Some(PromptOutcome::Submit(secret)) => assert_eq!(secret.expose_secret(), "hunter2"),
            other => panic!("expected submit, got {other:?}"),
        }
        assert_eq!(prompt.len(), 0);
    }

    #[test]
    fn escape_cancels() {
        let mut prompt = PasswordPrompt::new();
        prompt.handle_key_event(key(KeyCode::Char('x')));
        assert!(matches!(
            prompt.handle_key_event(key(KeyCode::Esc)),
            Some(PromptOutcome::Cancel)
        ));
    }
}
