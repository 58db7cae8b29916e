// ── Command API ──
//
// Every mutation the dashboard can request. A `NetworkBackend` routes each
// variant to the matching NetworkManager call; success is observed later
// through signals and refreshes, not through the command result.

use secrecy::{ExposeSecret, SecretString};
use strum::{Display, VariantArray};

use netpala_nm::{ConnectionSettings, EnterpriseAuth, WirelessSecurity};

use crate::error::CoreError;
use crate::model::{Handle, SecurityKind};

/// All write operations against NetworkManager.
#[derive(Debug, Clone)]
pub enum Command {
    /// Bring up a saved profile on a device.
    Activate { connection: Handle, device: Handle },
    /// Save a new Wi-Fi profile, then activate it on `device`.
    AddAndActivate { profile: NewProfile, device: Handle },
    /// Forget a saved profile.
    Delete { connection: Handle },
    /// Global Wi-Fi radio switch.
    SetRadioPower { enabled: bool },
    /// Bring a VPN up, or down through its active instance.
    ToggleVpn {
        connection: Handle,
        active: Option<Handle>,
        currently_active: bool,
    },
    RequestRescan { device: Handle },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activate { .. } => "activate",
            Self::AddAndActivate { .. } => "add-and-activate",
            Self::Delete { .. } => "delete",
            Self::SetRadioPower { .. } => "set-radio-power",
            Self::ToggleVpn { .. } => "toggle-vpn",
            Self::RequestRescan { .. } => "request-rescan",
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Ok,
    /// A profile was saved and activation was requested.
    Added { connection: Handle },
}

// ── New profiles ────────────────────────────────────────────────────

/// What the operator typed (or didn't) to join a network.
#[derive(Debug, Clone)]
pub enum Credential {
    None,
    Passphrase(SecretString),
    Enterprise(EapConfig),
}

/// A Wi-Fi profile to create.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub ssid: String,
    /// Security label of the scanned network (`open`, `wpa2-psk`, ...).
    pub security: String,
    pub credential: Credential,
}

impl NewProfile {
    /// A credential-free profile. `security` is the scanned label; an OWE
    /// label gets `key-mgmt` `owe`, anything else no security section.
    pub fn open(ssid: impl Into<String>, security: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            security: security.into(),
            credential: Credential::None,
        }
    }

    pub fn personal(
        ssid: impl Into<String>,
        security: impl Into<String>,
        passphrase: SecretString,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            security: security.into(),
            credential: Credential::Passphrase(passphrase),
        }
    }

    /// An 802.1X profile. Fails when a required field is empty.
    pub fn enterprise(config: EapConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            ssid: config.ssid.trim().to_owned(),
            security: "wpa2-eap".into(),
            credential: Credential::Enterprise(config),
        })
    }

    /// The settings dictionary for `AddConnection`.
    pub fn to_settings(&self, uuid: &str) -> ConnectionSettings {
        let security = match &self.credential {
            Credential::None if SecurityKind::uses_owe(&self.security) => WirelessSecurity::Owe,
            Credential::None => WirelessSecurity::Open,
            Credential::Passphrase(psk) => WirelessSecurity::Psk {
                key_mgmt: if self.security == "wpa3-sae" {
                    "sae"
                } else {
                    "wpa-psk"
                },
                psk: psk.expose_secret().to_owned(),
            },
            Credential::Enterprise(config) => WirelessSecurity::Enterprise(config.to_auth()),
        };
        ConnectionSettings::wireless(&self.ssid, uuid, security)
    }
}

// ── 802.1X ──────────────────────────────────────────────────────────

/// Outer EAP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, VariantArray)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EapMethod {
    Peap,
    Ttls,
    Tls,
    Pwd,
}

/// Inner (phase 2) authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, VariantArray)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Phase2 {
    Mschapv2,
    Pap,
    Chap,
    Mschap,
    None,
}

/// Fields collected by the credential form.
#[derive(Debug, Clone)]
pub struct EapConfig {
    pub ssid: String,
    pub method: Option<EapMethod>,
    pub identity: String,
    pub password: SecretString,
    pub phase2: Phase2,
    /// Path to a CA certificate; empty means none.
    pub ca_cert: String,
}

impl EapConfig {
    /// Required fields, checked in the order they are reported.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ssid.trim().is_empty() {
            return Err(CoreError::validation("EAP config is missing SSID"));
        }
        if self.method.is_none() {
            return Err(CoreError::validation("EAP config is missing EAP method"));
        }
        if self.identity.trim().is_empty() {
            return Err(CoreError::validation("EAP config is missing identity"));
        }
        Ok(())
    }

    fn to_auth(&self) -> EnterpriseAuth {
        let ca_cert = self.ca_cert.trim();
        EnterpriseAuth {
            eap: self
                .method
                .map(|m| m.to_string().to_lowercase())
                .unwrap_or_default(),
            identity: self.identity.trim().to_owned(),
            password: self.password.expose_secret().to_owned(),
            phase2: match self.phase2 {
                Phase2::None => None,
                other => Some(other.to_string().to_lowercase()),
            },
            ca_cert: (!ca_cert.is_empty()).then(|| ca_cert.to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use netpala_nm::zvariant::Value;
    use pretty_assertions::assert_eq;

    fn eap_config() -> EapConfig {
        EapConfig {
            ssid: "Corp".into(),
            method: Some(EapMethod::Ttls),
            identity: "alice".into(),
            password: SecretString::from("s3cret".to_owned()),
            phase2: Phase2::Mschapv2,
            ca_cert: "/etc/ssl/corp.pem".into(),
        }
    }

    fn str_at<'a>(settings: &'a ConnectionSettings, section: &str, key: &str) -> Option<&'a str> {
        match settings.get(section, key)? {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[test]
    fn validation_reports_first_missing_field() {
        let mut config = eap_config();
        config.identity = "  ".into();
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "EAP config is missing identity"
        );

        config.method = None;
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "EAP config is missing EAP method"
        );

        config.ssid = String::new();
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "EAP config is missing SSID"
        );
    }

    #[test]
    fn enterprise_profile_requires_valid_config() {
        let mut config = eap_config();
        config.ssid = String::new();
        assert!(matches!(
            NewProfile::enterprise(config),
            Err(CoreError::ValidationFailed { .. })
        ));

        let profile = NewProfile::enterprise(eap_config()).unwrap();
        assert_eq!(profile.ssid, "Corp");
        assert_eq!(profile.security, "wpa2-eap");
    }

    #[test]
    fn enterprise_settings_use_lowercase_methods() {
        let profile = NewProfile::enterprise(eap_config()).unwrap();
        let settings = profile.to_settings("uuid-1");

        assert_eq!(str_at(&settings, "802-1x", "identity"), Some("alice"));
        assert_eq!(str_at(&settings, "802-1x", "phase2-auth"), Some("mschapv2"));
        assert_eq!(str_at(&settings, "802-11-wireless-security", "key-mgmt"), Some("wpa-eap"));
        assert!(settings.get("802-1x", "ca-cert").is_some());
    }

    #[test]
    fn phase2_none_and_empty_cert_are_omitted() {
        let mut config = eap_config();
        config.phase2 = Phase2::None;
        config.ca_cert = String::new();
        let settings = NewProfile::enterprise(config).unwrap().to_settings("uuid-2");

        assert!(settings.get("802-1x", "phase2-auth").is_none());
        assert!(settings.get("802-1x", "ca-cert").is_none());
    }

    #[test]
    fn personal_key_management_follows_label() {
        let sae = NewProfile::personal("Home", "wpa3-sae", SecretString::from("pw".to_owned()));
        assert_eq!(
            str_at(&sae.to_settings("u"), "802-11-wireless-security", "key-mgmt"),
            Some("sae")
        );

        let mixed = NewProfile::personal(
            "Home",
            "wpa3-sae / wpa2-psk",
            SecretString::from("pw".to_owned()),
        );
        assert_eq!(
            str_at(&mixed.to_settings("u"), "802-11-wireless-security", "key-mgmt"),
            Some("wpa-psk")
        );
    }

    #[test]
    fn open_profile_has_no_security() {
        let settings = NewProfile::open("CafeWifi", "open").to_settings("u");
        assert!(!settings.has_section("802-11-wireless-security"));
        assert_eq!(str_at(&settings, "connection", "id"), Some("CafeWifi"));
    }

    #[test]
    fn owe_network_joins_with_owe_key_management() {
        let profile = NewProfile::open("Airport", "wpa-owe");
        assert!(matches!(profile.credential, Credential::None));

        let settings = profile.to_settings("u");
        assert_eq!(str_at(&settings, "802-11-wireless-security", "key-mgmt"), Some("owe"));
        assert!(settings.get("802-11-wireless-security", "psk").is_none());
    }

    #[test]
    fn method_names_render_uppercase() {
        let names: Vec<String> = EapMethod::VARIANTS.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["PEAP", "TTLS", "TLS", "PWD"]);
        assert_eq!(Phase2::Mschapv2.to_string(), "MSCHAPV2");
    }
}
