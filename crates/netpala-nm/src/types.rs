// Raw NetworkManager object snapshots
//
// Decoded straight from `GetAll` / `GetSettings` replies without any
// interpretation beyond type conversion. `netpala-core` turns these into the
// domain model (security labels, connectivity, sorting).

use crate::client::DEVICE_IFACE;
use crate::error::{Error, Result};
use crate::value::{PropertyMap, PropertyMapExt, SettingsMap, ssid_to_string};

/// `NM_DEVICE_TYPE_WIFI`.
pub const DEVICE_TYPE_WIFI: u32 = 2;

/// Global manager properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerState {
    pub wireless_enabled: bool,
    pub wireless_hardware_enabled: bool,
    pub active_connections: Vec<String>,
}

impl ManagerState {
    pub fn from_properties(props: &PropertyMap) -> Self {
        Self {
            wireless_enabled: props.bool("WirelessEnabled").unwrap_or(false),
            wireless_hardware_enabled: props.bool("WirelessHardwareEnabled").unwrap_or(false),
            active_connections: props.object_paths("ActiveConnections"),
        }
    }
}

/// `org.freedesktop.NetworkManager.Device` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub path: String,
    pub interface: String,
    pub hw_address: String,
    pub device_type: u32,
    /// Raw `NMDeviceState` value.
    pub state: u32,
}

impl DeviceInfo {
    pub fn from_properties(path: &str, props: &PropertyMap) -> Result<Self> {
        let device_type = props.u32("DeviceType").ok_or_else(|| Error::MissingProperty {
            path: path.to_owned(),
            interface: DEVICE_IFACE,
            property: "DeviceType",
        })?;

        Ok(Self {
            path: path.to_owned(),
            interface: props.str("Interface").unwrap_or_default().to_owned(),
            hw_address: props.str("HwAddress").unwrap_or_default().to_owned(),
            device_type,
            state: props.u32("State").unwrap_or(0),
        })
    }

    pub fn is_wifi(&self) -> bool {
        self.device_type == DEVICE_TYPE_WIFI
    }
}

/// `org.freedesktop.NetworkManager.Device.Wireless` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirelessInfo {
    /// Raw `NM80211Mode` value.
    pub mode: u32,
    pub active_access_point: Option<String>,
    pub scanning: bool,
}

impl WirelessInfo {
    pub fn from_properties(props: &PropertyMap) -> Self {
        Self {
            mode: props.u32("Mode").unwrap_or(0),
            active_access_point: props.object_path("ActiveAccessPoint"),
            scanning: props.bool("Scanning").unwrap_or(false),
        }
    }
}

/// `org.freedesktop.NetworkManager.AccessPoint` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPointInfo {
    pub path: String,
    pub ssid: String,
    pub hw_address: String,
    /// Signal quality in percent.
    pub strength: u8,
    /// MHz.
    pub frequency: u32,
    pub flags: u32,
    pub wpa_flags: u32,
    pub rsn_flags: u32,
}

impl AccessPointInfo {
    pub fn from_properties(path: &str, props: &PropertyMap) -> Self {
        Self {
            path: path.to_owned(),
            ssid: props
                .bytes("Ssid")
                .map(|b| ssid_to_string(&b))
                .unwrap_or_default(),
            hw_address: props.str("HwAddress").unwrap_or_default().to_owned(),
            strength: props.u8("Strength").unwrap_or(0),
            frequency: props.u32("Frequency").unwrap_or(0),
            flags: props.u32("Flags").unwrap_or(0),
            wpa_flags: props.u32("WpaFlags").unwrap_or(0),
            rsn_flags: props.u32("RsnFlags").unwrap_or(0),
        }
    }
}

/// A saved connection profile and its settings dictionary.
#[derive(Debug)]
pub struct SavedProfile {
    pub path: String,
    pub settings: SettingsMap,
}

impl SavedProfile {
    pub fn new(path: impl Into<String>, settings: SettingsMap) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    fn section(&self, name: &str) -> Option<&PropertyMap> {
        self.settings.get(name)
    }

    /// `connection.id`.
    pub fn id(&self) -> Option<&str> {
        self.section("connection")?.str("id")
    }

    /// `connection.type` (`802-11-wireless`, `wireguard`, `vpn`, ...).
    pub fn kind(&self) -> Option<&str> {
        self.section("connection")?.str("type")
    }

    /// `connection.autoconnect`, which NetworkManager defaults to true.
    pub fn autoconnect(&self) -> bool {
        self.section("connection")
            .and_then(|s| s.bool("autoconnect"))
            .unwrap_or(true)
    }

    pub fn is_wireless(&self) -> bool {
        self.section("802-11-wireless").is_some()
    }

    /// `802-11-wireless.ssid`, decoded.
    pub fn ssid(&self) -> Option<String> {
        self.section("802-11-wireless")?
            .bytes("ssid")
            .map(|b| ssid_to_string(&b))
    }

    /// `802-11-wireless.hidden`.
    pub fn hidden(&self) -> bool {
        self.section("802-11-wireless")
            .and_then(|s| s.bool("hidden"))
            .unwrap_or(false)
    }

    /// The `802-11-wireless-security` section, when the profile has one.
    pub fn security(&self) -> Option<&PropertyMap> {
        self.section("802-11-wireless-security")
    }

    /// `802-11-wireless-security.key-mgmt`, lower-cased.
    pub fn key_mgmt(&self) -> Option<String> {
        self.security()?.str("key-mgmt").map(str::to_lowercase)
    }

    /// `vpn.service-type`, e.g. `org.freedesktop.NetworkManager.openvpn`.
    pub fn vpn_service_type(&self) -> Option<&str> {
        self.section("vpn")?.str("service-type")
    }
}
