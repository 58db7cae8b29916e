//! Notification listener: classifies bus signals into actions.
//!
//! Runs as a background task. It classifies exactly one recognized signal
//! per permit on `arm`, so the event loop decides when the next one may
//! be delivered. Unrecognized signals are consumed without using up the
//! permit.

use std::sync::Arc;

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use netpala_core::{SignalCategory, SignalSource};

use crate::action::Action;

/// Spawn the listener over `source`.
pub fn spawn<S>(
    mut source: S,
    action_tx: mpsc::UnboundedSender<Action>,
    arm: Arc<Notify>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SignalSource + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = arm.notified() => {}
            }

            let category = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                category = next_recognized(&mut source) => category,
            };

            let Some(category) = category else {
                warn!("signal stream closed, listener stopping");
                break;
            };
            debug!(%category, "signal classified");
            if action_tx.send(Action::Notified(category)).is_err() {
                break;
            }
        }
        debug!("listener stopped");
    })
}

/// Read until a signal classifies as something other than `Unrecognized`.
async fn next_recognized<S: SignalSource>(source: &mut S) -> Option<SignalCategory> {
    loop {
        let signal = source.next_signal().await?;
        match SignalCategory::classify(&signal) {
            SignalCategory::Unrecognized => trace!(signal = %signal.name(), "ignoring signal"),
            category => return Some(category),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::future::Future;
    use std::time::Duration;

    use netpala_core::RawSignal;
    use pretty_assertions::assert_eq;

    use super::*;

    const SETTINGS_IFACE: &str = "org.freedesktop.NetworkManager.Settings";
    const NM_IFACE: &str = "org.freedesktop.NetworkManager";
    const SETTINGS_PATH: &str = "/org/freedesktop/NetworkManager/Settings";

    struct ChannelSource(mpsc::UnboundedReceiver<RawSignal>);

    impl SignalSource for ChannelSource {
        fn next_signal(&mut self) -> impl Future<Output = Option<RawSignal>> + Send {
            self.0.recv()
        }
    }

    fn profile_added() -> RawSignal {
        RawSignal::new(SETTINGS_IFACE, "NewConnection", SETTINGS_PATH)
    }

    fn noise() -> RawSignal {
        RawSignal::new(NM_IFACE, "CheckPermissions", "/org/freedesktop/NetworkManager")
    }

    struct Harness {
        signals: mpsc::UnboundedSender<RawSignal>,
        actions: mpsc::UnboundedReceiver<Action>,
        arm: Arc<Notify>,
        cancel: CancellationToken,
    }

    fn harness() -> Harness {
        let (signals, signal_rx) = mpsc::unbounded_channel();
        let (action_tx, actions) = mpsc::unbounded_channel();
        let arm = Arc::new(Notify::new());
        let cancel = CancellationToken::new();
        spawn(
            ChannelSource(signal_rx),
            action_tx,
            Arc::clone(&arm),
            cancel.clone(),
        );
        Harness {
            signals,
            actions,
            arm,
            cancel,
        }
    }

    async fn next_action(actions: &mut mpsc::UnboundedReceiver<Action>) -> Option<Action> {
        tokio::time::timeout(Duration::from_secs(1), actions.recv())
            .await
            .ok()
            .flatten()
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_delivered_before_arming() {
        let mut h = harness();
        h.signals.send(profile_added()).unwrap();

        assert!(next_action(&mut h.actions).await.is_none());

        h.arm.notify_one();
        let action = next_action(&mut h.actions).await;
        assert!(matches!(
            action,
            Some(Action::Notified(SignalCategory::ProfileList))
        ));
        h.cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn unrecognized_signals_do_not_use_the_permit() {
        let mut h = harness();
        h.signals.send(noise()).unwrap();
        h.signals.send(noise()).unwrap();
        h.signals.send(profile_added()).unwrap();
        h.arm.notify_one();

        let action = next_action(&mut h.actions).await;
        assert!(matches!(
            action,
            Some(Action::Notified(SignalCategory::ProfileList))
        ));
        h.cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn one_signal_per_permit() {
        let mut h = harness();
        for _ in 0..3 {
            h.signals.send(profile_added()).unwrap();
        }
        h.arm.notify_one();

        let mut delivered = 0;
        while next_action(&mut h.actions).await.is_some() {
            delivered += 1;
        }
        assert_eq!(delivered, 1);

        h.arm.notify_one();
        assert!(next_action(&mut h.actions).await.is_some());
        h.cancel.cancel();
    }
}
