//! Application core: owns the model and runs the serialized action loop.
//!
//! Terminal events and background tasks (listener, debounce timer,
//! periodic refresher, delayed follow-ups) all feed the same action
//! channel. Actions are dispatched one at a time through `update`, and the
//! effects it returns are carried out before the next action is looked at.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::sync::{Notify, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use netpala_config::Config;
use netpala_core::{NetworkBackend, SignalSource, query};

use crate::action::{Action, Effect};
use crate::event::{Event, EventReader};
use crate::listener;
use crate::schedule::{self, Debouncer};
use crate::screens;
use crate::state::{Model, Timings};
use crate::tui::Tui;
use crate::update::update;

/// ~30 FPS.
const RENDER_RATE: Duration = Duration::from_millis(33);

pub struct App<B: NetworkBackend> {
    backend: B,
    model: Model,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Permits for the listener to classify one more signal.
    arm: Arc<Notify>,
    debouncer: Debouncer,
    /// Stops the listener, the refresher and pending follow-ups.
    cancel: CancellationToken,
    refresh_interval: Duration,
}

impl<B: NetworkBackend> App<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(config.debounce(), action_tx.clone());
        Self {
            backend,
            model: Model::new(Timings::from(config)),
            action_tx,
            action_rx,
            arm: Arc::new(Notify::new()),
            debouncer,
            cancel: CancellationToken::new(),
            refresh_interval: config.refresh_interval(),
        }
    }

    /// Run until the operator quits.
    pub async fn run<S>(&mut self, signals: S) -> Result<()>
    where
        S: SignalSource + 'static,
    {
        let mut tui = Tui::new()?;
        tui.enter()?;

        listener::spawn(
            signals,
            self.action_tx.clone(),
            Arc::clone(&self.arm),
            self.cancel.clone(),
        );

        // The initial full query completes before anything else is looked at.
        self.dispatch(Action::Startup).await;
        tokio::spawn(schedule::periodic_refresh(
            self.action_tx.clone(),
            self.refresh_interval,
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(RENDER_RATE);
        info!("event loop started");

        while !self.model.should_quit {
            let Some(event) = events.next().await else {
                break;
            };

            let render = matches!(event, Event::Render);
            match event {
                Event::Key(key) => self.dispatch(Action::Key(key)).await,
                // The next draw picks up the new size.
                Event::Resize(w, h) => debug!(w, h, "terminal resized"),
                Event::Render => {}
            }

            // Background work queued since the last event.
            self.drain_pending().await;

            if render {
                tui.draw(|frame| screens::render(frame, &self.model))?;
            }
        }

        self.cancel.cancel();
        events.stop();
        info!("event loop ended");
        Ok(())
    }

    async fn drain_pending(&mut self) {
        while !self.model.should_quit {
            let Ok(action) = self.action_rx.try_recv() else {
                break;
            };
            self.dispatch(action).await;
        }
    }

    /// Apply `action` and every action its effects produce, in order.
    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for effect in update(&mut self.model, action) {
                self.run_effect(effect, &mut queue).await;
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect, queue: &mut VecDeque<Action>) {
        match effect {
            Effect::Query { kinds, rearm } => {
                for kind in kinds {
                    match query(&self.backend, kind).await {
                        Ok(update) => queue.push_back(Action::Refreshed(update)),
                        Err(e) => {
                            warn!(%kind, error = %e, "query failed");
                            queue.push_back(Action::Failed(e.to_string()));
                        }
                    }
                }
                // Re-arming must not depend on every query succeeding.
                queue.push_back(Action::RefreshDone { rearm });
            }
            Effect::Execute(command) => {
                let name = command.name();
                match self.backend.execute(command).await {
                    Ok(result) => debug!(command = name, ?result, "command done"),
                    Err(e) => {
                        warn!(command = name, error = %e, "command failed");
                        queue.push_back(Action::Failed(e.to_string()));
                    }
                }
            }
            Effect::ArmListener => {
                debug!("listener armed");
                self.arm.notify_one();
            }
            Effect::Debounce { generation } => self.debouncer.trigger(generation),
            Effect::Schedule { delay, action } => {
                schedule::schedule_once(self.action_tx.clone(), delay, *action, self.cancel.clone());
            }
        }
    }
}
