// ── Wi-Fi device ──

use strum::Display;

use super::handle::Handle;

/// Per-device link state, collapsed from `NMDeviceState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Connectivity {
    Disconnected,
    Connecting,
    Connected,
}

impl Connectivity {
    const ACTIVATED: u32 = 100;
    const DISCONNECTED: u32 = 30;

    /// Everything between "disconnected" and "activated" (prepare, config,
    /// need-auth, ip-config, ...) counts as connecting.
    pub fn from_device_state(state: u32) -> Self {
        match state {
            Self::ACTIVATED => Self::Connected,
            Self::DISCONNECTED => Self::Disconnected,
            _ => Self::Connecting,
        }
    }
}

/// A Wi-Fi device as shown in the Device and Station boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub handle: Handle,
    /// Interface name, e.g. `wlan0`.
    pub name: String,
    /// `station`, `ap`, `ad-hoc`, `mesh`, or the raw mode number.
    pub mode: String,
    /// Software and hardware radio switches are both on.
    pub powered: bool,
    /// Lower-case MAC address.
    pub address: String,
    pub connectivity: Connectivity,
    /// BSSID of the access point the device is associated with.
    pub active_bssid: Option<String>,
    pub scanning: bool,
    /// MHz of the active access point.
    pub frequency: Option<u32>,
    /// Security label of the active link, `-` when unknown.
    pub security: String,
}
