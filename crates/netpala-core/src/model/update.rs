// ── Entity refresh results ──

use strum::{Display, EnumIter};

use super::device::Device;
use super::network::{KnownNetwork, ScannedNetwork};
use super::vpn::VpnConnection;

/// One of the four entity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Devices,
    Known,
    Scanned,
    Vpns,
}

/// What happened to the scanned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanUpdate {
    /// Access points appeared or vanished; fresh results will follow.
    /// Carries no data and leaves the current list alone.
    RescanRequested,
    /// A completed query, possibly empty.
    Results(Vec<ScannedNetwork>),
}

/// A freshly queried entity list, replacing the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityUpdate {
    Devices(Vec<Device>),
    Known(Vec<KnownNetwork>),
    Scanned(ScanUpdate),
    Vpns(Vec<VpnConnection>),
}

impl EntityUpdate {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Devices(_) => EntityKind::Devices,
            Self::Known(_) => EntityKind::Known,
            Self::Scanned(_) => EntityKind::Scanned,
            Self::Vpns(_) => EntityKind::Vpns,
        }
    }
}
