// ── Signal classification ──
//
// NetworkManager is chatty: access points publish a PropertiesChanged
// for every strength fluctuation. Only a handful of signals mean one of the
// dashboard's lists is stale; everything else is `Unrecognized` and dropped.

use std::future::Future;

use netpala_nm::client::{
    DEVICE_IFACE, NM_IFACE, NM_PATH, PROPERTIES_IFACE, SETTINGS_IFACE, WIRELESS_IFACE,
};
use netpala_nm::{RawSignal, SignalStream};

use crate::model::EntityKind;

/// What a signal says about the dashboard's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SignalCategory {
    /// A property changed on the manager object or on a device.
    CoreProperties,
    /// A device appeared, vanished or changed state.
    DeviceTopology,
    /// A saved profile was added or removed.
    ProfileList,
    /// An access point appeared or vanished.
    ScanResults,
    Unrecognized,
}

impl SignalCategory {
    pub fn classify(signal: &RawSignal) -> Self {
        match (signal.interface.as_str(), signal.member.as_str()) {
            (PROPERTIES_IFACE, "PropertiesChanged") => {
                let on_device = signal.changed_interface.as_deref() == Some(DEVICE_IFACE);
                if signal.path == NM_PATH || on_device {
                    Self::CoreProperties
                } else {
                    Self::Unrecognized
                }
            }
            (NM_IFACE, "DeviceAdded" | "DeviceRemoved") | (DEVICE_IFACE, "StateChanged") => {
                Self::DeviceTopology
            }
            (SETTINGS_IFACE, "NewConnection" | "ConnectionRemoved") => Self::ProfileList,
            (WIRELESS_IFACE, "AccessPointAdded" | "AccessPointRemoved") => Self::ScanResults,
            _ => Self::Unrecognized,
        }
    }

    /// Lists to re-query immediately. Scan results are debounced instead,
    /// so that category (and `Unrecognized`) refreshes nothing here.
    pub fn refresh_kinds(self) -> &'static [EntityKind] {
        match self {
            // VPN state changes surface as property changes.
            Self::CoreProperties => &[EntityKind::Devices, EntityKind::Vpns],
            Self::DeviceTopology => &[EntityKind::Devices, EntityKind::Known],
            Self::ProfileList => &[EntityKind::Known, EntityKind::Vpns],
            Self::ScanResults | Self::Unrecognized => &[],
        }
    }
}

/// Where the listener task reads signals from.
pub trait SignalSource: Send {
    /// The next signal, or `None` once the source is closed.
    fn next_signal(&mut self) -> impl Future<Output = Option<RawSignal>> + Send;
}

impl SignalSource for SignalStream {
    fn next_signal(&mut self) -> impl Future<Output = Option<RawSignal>> + Send {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEVICE_PATH: &str = "/org/freedesktop/NetworkManager/Devices/3";

    #[test]
    fn manager_property_change_is_core() {
        let signal = RawSignal::new(PROPERTIES_IFACE, "PropertiesChanged", NM_PATH)
            .with_changed_interface(NM_IFACE);
        assert_eq!(SignalCategory::classify(&signal), SignalCategory::CoreProperties);
    }

    #[test]
    fn device_property_change_is_core() {
        let signal = RawSignal::new(PROPERTIES_IFACE, "PropertiesChanged", DEVICE_PATH)
            .with_changed_interface(DEVICE_IFACE);
        assert_eq!(SignalCategory::classify(&signal), SignalCategory::CoreProperties);
    }

    #[test]
    fn access_point_property_change_is_ignored() {
        let signal = RawSignal::new(
            PROPERTIES_IFACE,
            "PropertiesChanged",
            "/org/freedesktop/NetworkManager/AccessPoint/12",
        )
        .with_changed_interface("org.freedesktop.NetworkManager.AccessPoint");
        assert_eq!(SignalCategory::classify(&signal), SignalCategory::Unrecognized);
    }

    #[test]
    fn topology_profile_and_scan_signals() {
        let cases = [
            (NM_IFACE, "DeviceAdded", SignalCategory::DeviceTopology),
            (NM_IFACE, "DeviceRemoved", SignalCategory::DeviceTopology),
            (DEVICE_IFACE, "StateChanged", SignalCategory::DeviceTopology),
            (SETTINGS_IFACE, "NewConnection", SignalCategory::ProfileList),
            (SETTINGS_IFACE, "ConnectionRemoved", SignalCategory::ProfileList),
            (WIRELESS_IFACE, "AccessPointAdded", SignalCategory::ScanResults),
            (WIRELESS_IFACE, "AccessPointRemoved", SignalCategory::ScanResults),
            (NM_IFACE, "CheckPermissions", SignalCategory::Unrecognized),
        ];
        for (iface, member, expected) in cases {
            let signal = RawSignal::new(iface, member, DEVICE_PATH);
            assert_eq!(SignalCategory::classify(&signal), expected, "{iface}.{member}");
        }
    }

    #[test]
    fn scan_results_are_not_refreshed_immediately() {
        assert!(SignalCategory::ScanResults.refresh_kinds().is_empty());
        assert!(SignalCategory::Unrecognized.refresh_kinds().is_empty());
        assert_eq!(
            SignalCategory::ProfileList.refresh_kinds(),
            &[EntityKind::Known, EntityKind::Vpns]
        );
    }
}
