//! Exclusive interaction modes.

use crate::widgets::confirm::ConfirmDialog;
use crate::widgets::credential_form::CredentialForm;

/// Which handler owns raw key input. While a dialog is open the lists
/// and the selection do not react to keys.
#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    Browse,
    CredentialForm(CredentialForm),
    ConfirmDialog(ConfirmDialog),
}

impl Modal {
    pub fn is_browse(&self) -> bool {
        matches!(self, Self::Browse)
    }
}
