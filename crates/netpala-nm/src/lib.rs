// netpala-nm: Async client for the NetworkManager D-Bus API.
//
// Wraps the handful of NetworkManager objects the dashboard touches
// (manager, devices, access points, saved settings, active connections)
// plus the signal subscription that drives live updates.

pub mod client;
pub mod error;
pub mod settings;
pub mod signals;
pub mod types;
pub mod value;

pub use client::NmClient;
pub use error::Error;
pub use settings::{ConnectionSettings, EnterpriseAuth, WirelessSecurity};
pub use signals::{RawSignal, SignalStream};
pub use types::{AccessPointInfo, DeviceInfo, ManagerState, SavedProfile, WirelessInfo};
pub use value::{PropertyMap, PropertyMapExt, SettingsMap};

// Downstream tests build property maps and bus errors by hand.
pub use zbus::{self, zvariant};
