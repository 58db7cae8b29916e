// ── NetworkManager-to-domain conversions ──
//
// Pure functions from raw `netpala_nm` snapshots to the dashboard model:
// security labels, device facts, deduplication and ordering. No bus access
// happens here, so every rule is unit-testable.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use netpala_nm::value::PropertyMapExt;
use netpala_nm::{AccessPointInfo, DeviceInfo, ManagerState, PropertyMap, SavedProfile, WirelessInfo};

use crate::model::{Connectivity, Device, Handle, KnownNetwork, ScannedNetwork, VpnConnection};

// ── Access point security ──────────────────────────────────────────

const KEY_MGMT_PSK: u32 = 0x0000_0100;
const KEY_MGMT_802_1X: u32 = 0x0000_0200;
const KEY_MGMT_SAE: u32 = 0x0000_0400;
const KEY_MGMT_OWE: u32 = 0x0000_0800;
const KEY_MGMT_OWE_TM: u32 = 0x0000_1000;
const KEY_MGMT_EAP_SUITE_B_192: u32 = 0x0000_2000;

/// Label an access point from its WPA and RSN key-management flags.
///
/// Several mechanisms are joined with ` / `, strongest first.
pub fn access_point_security(wpa_flags: u32, rsn_flags: u32) -> String {
    let either = wpa_flags | rsn_flags;
    let mut labels = Vec::new();

    if rsn_flags & KEY_MGMT_SAE != 0 {
        labels.push("wpa3-sae");
    }
    if rsn_flags & KEY_MGMT_EAP_SUITE_B_192 != 0 {
        labels.push("wpa3-eap-192");
    }
    if either & KEY_MGMT_802_1X != 0 {
        labels.push("wpa2-eap");
    }
    if either & KEY_MGMT_PSK != 0 {
        labels.push("wpa2-psk");
    }
    if rsn_flags & (KEY_MGMT_OWE | KEY_MGMT_OWE_TM) != 0 {
        labels.push("wpa-owe");
    }

    if labels.is_empty() {
        "open".into()
    } else {
        labels.join(" / ")
    }
}

// ── Saved profile security ─────────────────────────────────────────

/// Label a saved profile from its `key-mgmt`.
pub fn profile_security(profile: &SavedProfile) -> String {
    let Some(key_mgmt) = profile.key_mgmt() else {
        return "open".into();
    };
    let label = if key_mgmt.contains("sae") {
        "wpa3-sae"
    } else if key_mgmt.contains("owe") {
        "owe"
    } else if key_mgmt.contains("wpa-psk") {
        "wpa2-psk"
    } else if key_mgmt.contains("wpa-eap") {
        "wpa2-eap"
    } else if key_mgmt.contains("none") {
        "wep"
    } else {
        "encrypted"
    };
    label.into()
}

/// Label the device's current link from the matching profile's security
/// section. `-` when there is nothing to go on.
pub fn link_security(security: Option<&PropertyMap>) -> String {
    let Some(section) = security else {
        return "-".into();
    };
    if let Some(key_mgmt) = section.str("key-mgmt").map(str::to_lowercase) {
        if key_mgmt.contains("sae") {
            return "wpa3-sae".into();
        }
        if key_mgmt.contains("wpa-psk") {
            return "wpa2-psk".into();
        }
        if key_mgmt.contains("wpa-eap") {
            return "wpa2-eap".into();
        }
        if key_mgmt.contains("none") {
            return "open".into();
        }
    }
    if section.contains_key("psk") {
        return "wpa-psk".into();
    }
    "encrypted".into()
}

// ── Devices ────────────────────────────────────────────────────────

/// `NM80211Mode` to a short name.
pub fn mode_name(mode: u32) -> String {
    match mode {
        1 => "ad-hoc".into(),
        2 => "station".into(),
        3 => "ap".into(),
        4 => "mesh".into(),
        other => other.to_string(),
    }
}

/// Assemble one Wi-Fi device.
///
/// `active_ap` is the access point the device is associated with, if any;
/// `profiles` are searched for one with the same SSID to label the link.
pub fn device(
    info: DeviceInfo,
    wireless: &WirelessInfo,
    manager: &ManagerState,
    active_ap: Option<&AccessPointInfo>,
    profiles: &[SavedProfile],
) -> Device {
    let security = active_ap.map_or_else(
        || "-".to_owned(),
        |ap| {
            let profile = profiles
                .iter()
                .find(|p| p.ssid().as_deref() == Some(ap.ssid.as_str()));
            link_security(profile.and_then(SavedProfile::security))
        },
    );

    Device {
        handle: Handle::new(info.path),
        name: info.interface,
        mode: mode_name(wireless.mode),
        powered: manager.wireless_enabled && manager.wireless_hardware_enabled,
        address: info.hw_address.to_lowercase(),
        connectivity: Connectivity::from_device_state(info.state),
        active_bssid: active_ap.map(|ap| ap.hw_address.clone()),
        scanning: wireless.scanning,
        frequency: active_ap.map(|ap| ap.frequency),
        security,
    }
}

// ── Scanned networks ───────────────────────────────────────────────

/// Strongest access point per non-empty SSID, in first-seen order.
fn strongest_by_ssid(access_points: &[AccessPointInfo]) -> IndexMap<&str, &AccessPointInfo> {
    let mut best: IndexMap<&str, &AccessPointInfo> = IndexMap::new();
    for ap in access_points.iter().filter(|ap| !ap.ssid.is_empty()) {
        best.entry(ap.ssid.as_str())
            .and_modify(|cur| {
                if ap.strength > cur.strength {
                    *cur = ap;
                }
            })
            .or_insert(ap);
    }
    best
}

/// One entry per SSID (strongest wins), hidden SSIDs dropped, strongest first.
pub fn scanned_networks(access_points: &[AccessPointInfo]) -> Vec<ScannedNetwork> {
    let mut networks: Vec<ScannedNetwork> = strongest_by_ssid(access_points)
        .into_values()
        .map(|ap| ScannedNetwork {
            bssid: ap.hw_address.clone(),
            ssid: ap.ssid.clone(),
            security: access_point_security(ap.wpa_flags, ap.rsn_flags),
            signal: ap.strength,
        })
        .collect();
    networks.sort_by(|a, b| b.signal.cmp(&a.signal));
    networks
}

// ── Known networks ─────────────────────────────────────────────────

/// Wireless profiles enriched with live signal and connection state.
///
/// Connected entries come first, then by signal, strongest first.
pub fn known_networks(
    profiles: &[SavedProfile],
    visible: &[AccessPointInfo],
    connected_ssids: &HashSet<String>,
) -> Vec<KnownNetwork> {
    let strongest = strongest_by_ssid(visible);

    let mut known: Vec<KnownNetwork> = profiles
        .iter()
        .filter_map(|profile| {
            let ssid = profile.ssid()?;
            let ap = strongest.get(ssid.as_str());
            Some(KnownNetwork {
                handle: Handle::new(profile.path.clone()),
                bssid: ap.map(|ap| ap.hw_address.clone()),
                security: profile_security(profile),
                hidden: profile.hidden(),
                autoconnect: profile.autoconnect(),
                signal: ap.map_or(0, |ap| ap.strength),
                connected: connected_ssids.contains(&ssid),
                ssid,
            })
        })
        .collect();

    known.sort_by(|a, b| b.connected.cmp(&a.connected).then(b.signal.cmp(&a.signal)));
    known
}

// ── VPN ────────────────────────────────────────────────────────────

/// Friendly type: `WireGuard`, or the upper-cased plugin name of a
/// `vpn.service-type` such as `org.freedesktop.NetworkManager.openvpn`.
pub fn vpn_kind(profile: &SavedProfile) -> String {
    if profile.kind() == Some("wireguard") {
        return "WireGuard".into();
    }
    profile
        .vpn_service_type()
        .and_then(|service| service.rsplit('.').next())
        .filter(|name| !name.is_empty())
        .map_or_else(|| "VPN".to_owned(), str::to_uppercase)
}

/// VPN and WireGuard profiles. `active` maps saved-profile path to
/// active-connection path.
pub fn vpn_connections(
    profiles: &[SavedProfile],
    active: &HashMap<String, String>,
) -> Vec<VpnConnection> {
    profiles
        .iter()
        .filter(|p| matches!(p.kind(), Some("wireguard" | "vpn")))
        .map(|profile| {
            let active = active.get(&profile.path).map(|p| Handle::new(p.clone()));
            VpnConnection {
                handle: Handle::new(profile.path.clone()),
                connected: active.is_some(),
                active,
                name: profile.id().unwrap_or_default().to_owned(),
                kind: vpn_kind(profile),
            }
        })
        .collect()
}
