// ── Dashboard domain model ──
//
// Value snapshots of everything the dashboard shows. Lists are always
// replaced wholesale; nothing here is mutated field by field.

pub mod device;
pub mod handle;
pub mod network;
pub mod update;
pub mod vpn;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{Connectivity, Device};
pub use handle::Handle;
pub use network::{KnownNetwork, ScannedNetwork, SecurityKind};
pub use update::{EntityKind, EntityUpdate, ScanUpdate};
pub use vpn::VpnConnection;
