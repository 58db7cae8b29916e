//! Timers feeding actions back into the event loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;

/// Trailing-edge debounce for scan-results notifications.
///
/// Each trigger replaces the running timer, so a burst produces a single
/// `DebounceElapsed` carrying the generation of its last trigger.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<Action>,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn trigger(&mut self, generation: u64) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        let tx = self.tx.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::DebounceElapsed { generation });
        });
        self.pending = Some(task.abort_handle());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Send `action` once after `delay`, unless cancelled first.
pub fn schedule_once(
    tx: mpsc::UnboundedSender<Action>,
    delay: Duration,
    action: Action,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {}
            () = tokio::time::sleep(delay) => {
                let _ = tx.send(action);
            }
        }
    });
}

/// Emit `PeriodicRefresh` every `interval`. The first one fires one
/// interval after start, not immediately.
pub async fn periodic_refresh(
    tx: mpsc::UnboundedSender<Action>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker.tick().await; // first tick is immediate; skip it

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                debug!("periodic refresh");
                if tx.send(Action::PeriodicRefresh).is_err() {
                    break;
                }
            }
        }
    }
}
