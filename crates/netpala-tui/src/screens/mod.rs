//! Top-level frame composition.

pub mod dashboard;
pub mod error;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::component::Component;
use crate::state::{Modal, Model};
use crate::widgets::status_bar;

/// Draw one frame from the model. The error state replaces everything.
pub fn render(frame: &mut Frame, model: &Model) {
    let area = frame.area();
    if let Some(message) = &model.error {
        error::render(frame, area, message);
        return;
    }

    let [main, bar] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    dashboard::render(frame, main, model);
    status_bar::render(frame, bar, model);

    match &model.modal {
        Modal::CredentialForm(form) => form.render(frame, main),
        Modal::ConfirmDialog(dialog) => dialog.render(frame, main),
        Modal::Browse => {}
    }
}
