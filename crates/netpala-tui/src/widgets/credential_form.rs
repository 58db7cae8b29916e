//! WPA-Enterprise credential form.
//!
//! Six focus slots: two inline selectors (EAP method, phase 2), three
//! text inputs (identity, password, CA certificate) and the Submit button.
//! The EAP method counts as chosen only once the operator has touched its
//! selector, so an untouched form fails validation instead of silently
//! submitting PEAP.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use secrecy::SecretString;
use strum::VariantArray;

use netpala_core::{EapConfig, EapMethod, Phase2};

use crate::component::Component;
use crate::theme;
use crate::widgets::centered_rect;

#[derive(Debug)]
pub enum FormOutcome {
    Submit(EapConfig),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Method,
    Phase2,
    Identity,
    Password,
    CaCert,
    Submit,
}

impl FormField {
    const ALL: [Self; 6] = [
        Self::Method,
        Self::Phase2,
        Self::Identity,
        Self::Password,
        Self::CaCert,
        Self::Submit,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone)]
pub struct CredentialForm {
    ssid: String,
    focus: FormField,
    method_index: usize,
    method_chosen: bool,
    phase2_index: usize,
    identity: String,
    password: String,
    ca_cert: String,
}

impl fmt::Debug for CredentialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialForm")
            .field("ssid", &self.ssid)
            .field("focus", &self.focus)
            .field("method_chosen", &self.method_chosen)
            .finish_non_exhaustive()
    }
}

impl CredentialForm {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            focus: FormField::Method,
            method_index: 0,
            method_chosen: false,
            phase2_index: 0,
            identity: String::new(),
            password: String::new(),
            ca_cert: String::new(),
        }
    }

    #[cfg(test)]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    fn method(&self) -> EapMethod {
        EapMethod::VARIANTS
            .get(self.method_index)
            .copied()
            .unwrap_or(EapMethod::Peap)
    }

    fn phase2(&self) -> Phase2 {
        Phase2::VARIANTS
            .get(self.phase2_index)
            .copied()
            .unwrap_or(Phase2::Mschapv2)
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Identity => Some(&mut self.identity),
            FormField::Password => Some(&mut self.password),
            FormField::CaCert => Some(&mut self.ca_cert),
            FormField::Method | FormField::Phase2 | FormField::Submit => None,
        }
    }

    fn cycle_selector(&mut self, forward: bool) {
        let step = |index: usize, len: usize| {
            if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        };
        match self.focus {
            FormField::Method => {
                self.method_index = step(self.method_index, EapMethod::VARIANTS.len());
                self.method_chosen = true;
            }
            FormField::Phase2 => {
                self.phase2_index = step(self.phase2_index, Phase2::VARIANTS.len());
            }
            _ => {}
        }
    }

    fn config(&self) -> EapConfig {
        EapConfig {
            ssid: self.ssid.clone(),
            method: self.method_chosen.then(|| self.method()),
            identity: self.identity.clone(),
            password: SecretString::from(self.password.clone()),
            phase2: self.phase2(),
            ca_cert: self.ca_cert.clone(),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_selector(&self, frame: &mut Frame, area: Rect, label: &str, value: &str, field: FormField) {
        let active = self.focus == field;
        let arrow_style = if active {
            Style::default().fg(theme::AMBER)
        } else {
            theme::border_default()
        };
        let value_style = if active {
            theme::title_style()
        } else {
            theme::table_row()
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("  {label:<12}"), label_style(active)),
                Span::styled("\u{25C2} ", arrow_style),
                Span::styled(value.to_owned(), value_style),
                Span::styled(" \u{25B8}", arrow_style),
            ])),
            area,
        );
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, label: &str, field: FormField) {
        let active = self.focus == field;
        let (value, placeholder, masked) = match field {
            FormField::Identity => (&self.identity, "Identity", false),
            FormField::Password => (&self.password, "Password", true),
            _ => (&self.ca_cert, "e.g. /etc/ssl/certs/ca.pem", false),
        };

        let mut spans = vec![Span::styled(format!("  {label:<12}"), label_style(active))];
        if value.is_empty() && !active {
            spans.push(Span::styled(placeholder, theme::key_hint()));
        } else if masked {
            spans.push(Span::styled(
                "\u{25CF}".repeat(value.chars().count()),
                theme::table_row(),
            ));
        } else {
            spans.push(Span::styled(value.clone(), theme::table_row()));
        }
        if active {
            spans.push(Span::styled("\u{2588}", Style::default().fg(theme::AMBER)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let style = if self.focus == FormField::Submit {
            Style::default()
                .fg(theme::BG_PANEL)
                .bg(theme::AMBER)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::table_row()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(" Submit ", style)).alignment(Alignment::Center),
            area,
        );
    }
}

fn label_style(active: bool) -> Style {
    if active {
        Style::default().fg(theme::SKY)
    } else {
        theme::table_row()
    }
}

impl Component for CredentialForm {
    type Outcome = FormOutcome;

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<FormOutcome> {
        match key.code {
            KeyCode::Esc => return Some(FormOutcome::Cancel),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Left => self.cycle_selector(false),
            KeyCode::Right => self.cycle_selector(true),
            KeyCode::Enter => match self.focus {
                FormField::Submit => return Some(FormOutcome::Submit(self.config())),
                FormField::Method => {
                    self.method_chosen = true;
                    self.focus = self.focus.next();
                }
                _ => self.focus = self.focus.next(),
            },
            KeyCode::Backspace => {
                if let Some(input) = self.active_input_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.active_input_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let panel = centered_rect(56, 14, area);
        frame.render_widget(Clear, panel);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("WPA-EAP \u{b7} {}", self.ssid), theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let rows = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // EAP method
            Constraint::Length(1), // phase 2
            Constraint::Length(1), // spacer
            Constraint::Length(1), // identity
            Constraint::Length(1), // password
            Constraint::Length(1), // CA cert
            Constraint::Length(1), // spacer
            Constraint::Length(1), // submit
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let method = if self.method_chosen {
            self.method().to_string()
        } else {
            "choose".to_owned()
        };
        self.render_selector(frame, rows[1], "EAP method", &method, FormField::Method);
        self.render_selector(frame, rows[2], "Phase 2", &self.phase2().to_string(), FormField::Phase2);
        self.render_input(frame, rows[4], "Identity", FormField::Identity);
        self.render_input(frame, rows[5], "Password", FormField::Password);
        self.render_input(frame, rows[6], "CA cert", FormField::CaCert);
        self.render_submit(frame, rows[8]);

        let hints = match self.focus {
            FormField::Method | FormField::Phase2 => {
                "\u{25C2}/\u{25B8} select  Tab next  Esc cancel"
            }
            FormField::Submit => "Enter submit  Shift+Tab prev  Esc cancel",
            _ => "Tab next  Shift+Tab prev  Esc cancel",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, theme::key_hint())).alignment(Alignment::Center),
            rows[10],
        );
    }
}
