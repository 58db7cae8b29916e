// ── Known and scanned Wi-Fi networks ──

use super::handle::Handle;

/// A saved Wi-Fi profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownNetwork {
    /// Saved-profile path.
    pub handle: Handle,
    /// BSSID of the strongest visible access point with this SSID.
    pub bssid: Option<String>,
    pub ssid: String,
    pub security: String,
    pub hidden: bool,
    pub autoconnect: bool,
    /// Percent, 0 when out of range.
    pub signal: u8,
    pub connected: bool,
}

/// A visible network without a saved profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedNetwork {
    pub bssid: String,
    pub ssid: String,
    pub security: String,
    pub signal: u8,
}

impl ScannedNetwork {
    pub fn security_kind(&self) -> SecurityKind {
        SecurityKind::from_label(&self.security)
    }
}

/// How a new network has to be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityKind {
    /// No credential at all (unencrypted or OWE).
    Open,
    /// Single passphrase (WPA/WPA2/WPA3 personal).
    Personal,
    /// 802.1X credentials.
    Enterprise,
}

impl SecurityKind {
    /// Classify a security label such as `wpa2-psk` or `wpa3-sae / wpa2-psk`.
    /// OWE encrypts without a secret, so it joins like an open network.
    pub fn from_label(label: &str) -> Self {
        if label.split(" / ").any(|part| part.contains("eap")) {
            Self::Enterprise
        } else if label.split(" / ").all(|part| part == "open" || part.contains("owe")) {
            Self::Open
        } else {
            Self::Personal
        }
    }

    /// Whether a credential-free join should negotiate OWE.
    pub fn uses_owe(label: &str) -> bool {
        label.split(" / ").any(|part| part.contains("owe"))
    }
}
