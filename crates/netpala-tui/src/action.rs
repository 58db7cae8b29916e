//! Actions in, effects out. Actions are the sole mechanism for state mutation.

use std::time::Duration;

use crossterm::event::KeyEvent;
use netpala_core::{Command, EntityKind, EntityUpdate, SignalCategory};

/// Every state transition of the dashboard is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    /// Initial full query; arms the listener once it completes.
    Startup,

    // ── Input ──────────────────────────────────────────────────────
    Key(KeyEvent),

    // ── Signals & timers ───────────────────────────────────────────
    /// The listener classified a signal. It waits for a re-arm before
    /// classifying the next one.
    Notified(SignalCategory),
    DebounceElapsed { generation: u64 },
    PeriodicRefresh,
    /// A delayed follow-up query scheduled by an earlier action.
    Refresh(Vec<EntityKind>),

    // ── Query results ──────────────────────────────────────────────
    Refreshed(EntityUpdate),
    /// Every list of a query batch has been applied.
    RefreshDone { rearm: bool },
    /// A query or command failed, or a precondition did not hold.
    Failed(String),
}

/// Work `update` asks the runtime to perform.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Query each list in turn, then report `RefreshDone { rearm }`.
    Query { kinds: Vec<EntityKind>, rearm: bool },
    Execute(Command),
    /// Let the listener classify one more signal.
    ArmListener,
    /// (Re)start the scan debounce timer.
    Debounce { generation: u64 },
    /// Feed `action` back in after `delay`.
    Schedule { delay: Duration, action: Box<Action> },
}
