// netpala-core: Domain model and NetworkManager operations for netpala.
//
// The TUI never talks to the bus directly. It asks a `NetworkBackend` for
// fresh entity lists and hands it `Command`s; `Controller` is the
// NetworkManager-backed implementation.

pub mod backend;
pub mod command;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod notify;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{NetworkBackend, query};
pub use command::{Command, CommandResult, Credential, EapConfig, EapMethod, NewProfile, Phase2};
pub use controller::Controller;
pub use error::CoreError;
pub use notify::{SignalCategory, SignalSource};
pub use reconcile::reconcile;

// Signals as delivered by the transport; `SignalSource` yields these.
pub use netpala_nm::RawSignal;

pub use model::{
    Connectivity, Device, EntityKind, EntityUpdate, Handle, KnownNetwork, ScanUpdate,
    ScannedNetwork, SecurityKind, VpnConnection,
};
