//! Everything the dashboard knows, owned by the event loop.

pub mod modal;
pub mod navigation;
pub mod snapshot;

use std::time::Duration;

use netpala_config::Config;
use netpala_core::ScannedNetwork;

pub use modal::Modal;
pub use navigation::{BoxId, BoxLengths, Navigation};
pub use snapshot::{KnownRow, PendingNetwork, Snapshot};

use crate::widgets::prompt::PasswordPrompt;

/// Delays of the follow-up refreshes `update` schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub known_refresh_delay: Duration,
    pub rescan_status_delay: Duration,
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Self {
            known_refresh_delay: config.known_refresh_delay(),
            rescan_status_delay: config.rescan_status_delay(),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// The single owned state value threaded through `update`.
#[derive(Debug, Default)]
pub struct Model {
    pub snapshot: Snapshot,
    pub nav: Navigation,
    pub modal: Modal,
    /// Passphrase entry in the status bar; only meaningful in `Browse`.
    pub prompt: Option<PasswordPrompt>,
    /// The scanned network the current connect flow is about. Captured when
    /// the flow starts, so moving the selection while typing changes nothing.
    pub selected_network: Option<ScannedNetwork>,
    /// Terminal error state; replaces the dashboard until quit.
    pub error: Option<String>,
    /// The listener task holds a permit to classify the next signal.
    pub listener_armed: bool,
    /// Bumped on every scan-results notification; only the latest
    /// debounce timer may query.
    pub scan_generation: u64,
    pub should_quit: bool,
    pub timings: Timings,
}

impl Model {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Typing into the password prompt.
    #[cfg(test)]
    pub fn is_typing(&self) -> bool {
        self.prompt.is_some()
    }
}
