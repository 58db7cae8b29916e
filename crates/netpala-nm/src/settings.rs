//! Builders for the `a{sa{sv}}` dictionaries passed to `AddConnection`.

use std::collections::HashMap;

use zbus::zvariant::Value;

type Section = HashMap<&'static str, Value<'static>>;

/// Wireless security for a new profile.
#[derive(Debug, Clone, PartialEq)]
pub enum WirelessSecurity {
    /// No `802-11-wireless-security` section at all.
    Open,
    /// Opportunistic Wireless Encryption: `key-mgmt` `owe`, no secret.
    Owe,
    /// Pre-shared key; `key_mgmt` is `wpa-psk` or `sae`.
    Psk { key_mgmt: &'static str, psk: String },
    /// 802.1X with an `802-1x` section.
    Enterprise(EnterpriseAuth),
}

/// The `802-1x` section, already normalized to NetworkManager spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseAuth {
    /// Lower-case outer method (`peap`, `ttls`, `tls`, `pwd`).
    pub eap: String,
    pub identity: String,
    pub password: String,
    /// Lower-case inner method; `None` omits `phase2-auth`.
    pub phase2: Option<String>,
    /// Absolute path to a CA certificate.
    pub ca_cert: Option<String>,
}

/// A complete wireless profile ready for `Settings.AddConnection`.
#[derive(Debug)]
pub struct ConnectionSettings {
    dict: HashMap<&'static str, Section>,
}

impl ConnectionSettings {
    /// Infrastructure-mode Wi-Fi profile with automatic IPv4/IPv6.
    pub fn wireless(ssid: &str, uuid: &str, security: WirelessSecurity) -> Self {
        let mut dict = HashMap::new();

        dict.insert(
            "connection",
            Section::from([
                ("id", Value::from(ssid.to_owned())),
                ("uuid", Value::from(uuid.to_owned())),
                ("type", Value::from("802-11-wireless")),
                ("autoconnect", Value::from(true)),
            ]),
        );
        let mut wireless = Section::from([
            ("ssid", Value::from(ssid.as_bytes().to_vec())),
            ("mode", Value::from("infrastructure")),
        ]);
        if security != WirelessSecurity::Open {
            wireless.insert("security", Value::from("802-11-wireless-security"));
        }
        dict.insert("802-11-wireless", wireless);
        dict.insert("ipv4", Section::from([("method", Value::from("auto"))]));
        dict.insert("ipv6", Section::from([("method", Value::from("auto"))]));

        match security {
            WirelessSecurity::Open => {}
            WirelessSecurity::Owe => {
                dict.insert(
                    "802-11-wireless-security",
                    Section::from([("key-mgmt", Value::from("owe"))]),
                );
            }
            WirelessSecurity::Psk { key_mgmt, psk } => {
                dict.insert(
                    "802-11-wireless-security",
                    Section::from([
                        ("key-mgmt", Value::from(key_mgmt)),
                        ("psk", Value::from(psk)),
                    ]),
                );
            }
            WirelessSecurity::Enterprise(auth) => {
                dict.insert(
                    "802-11-wireless-security",
                    Section::from([("key-mgmt", Value::from("wpa-eap"))]),
                );
                dict.insert("802-1x", enterprise_section(auth));
            }
        }

        Self { dict }
    }

    /// The raw dictionary, for the bus call.
    pub fn as_dict(&self) -> &HashMap<&'static str, HashMap<&'static str, Value<'static>>> {
        &self.dict
    }

    /// Look up one value, mostly for assertions.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value<'static>> {
        self.dict.get(section)?.get(key)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.dict.contains_key(section)
    }
}

fn enterprise_section(auth: EnterpriseAuth) -> Section {
    let mut section = Section::from([
        ("eap", Value::from(vec![auth.eap])),
        ("identity", Value::from(auth.identity)),
        ("password", Value::from(auth.password)),
    ]);
    if let Some(phase2) = auth.phase2 {
        section.insert("phase2-auth", Value::from(phase2));
    }
    if let Some(path) = auth.ca_cert {
        // Path-scheme certificates are NUL-terminated byte strings.
        let mut uri = format!("file://{path}").into_bytes();
        uri.push(0);
        section.insert("ca-cert", Value::from(uri));
    }
    section
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn str_value<'a>(settings: &'a ConnectionSettings, section: &str, key: &str) -> &'a str {
        match settings.get(section, key).unwrap() {
            Value::Str(s) => s.as_str(),
            other => panic!("{section}.{key} is not a string: {other:?}"),
        }
    }

    #[test]
    fn open_profile_has_no_security_section() {
        let settings = ConnectionSettings::wireless("CafeWifi", "uuid-1", WirelessSecurity::Open);

        assert!(!settings.has_section("802-11-wireless-security"));
        assert!(settings.get("802-11-wireless", "security").is_none());
        assert_eq!(str_value(&settings, "connection", "id"), "CafeWifi");
        assert_eq!(str_value(&settings, "connection", "type"), "802-11-wireless");
        assert_eq!(str_value(&settings, "802-11-wireless", "mode"), "infrastructure");
        assert_eq!(str_value(&settings, "ipv4", "method"), "auto");
        assert_eq!(str_value(&settings, "ipv6", "method"), "auto");
    }

    #[test]
    fn psk_profile_links_security_section() {
        let settings = ConnectionSettings::wireless(
            "HomeNet",
            "uuid-2",
            WirelessSecurity::Psk {
                key_mgmt: "sae",
                psk: "hunter22".into(),
            },
        );

        assert_eq!(
            str_value(&settings, "802-11-wireless", "security"),
            "802-11-wireless-security"
        );
        assert_eq!(str_value(&settings, "802-11-wireless-security", "key-mgmt"), "sae");
        assert_eq!(str_value(&settings, "802-11-wireless-security", "psk"), "hunter22");
    }

    #[test]
    fn owe_profile_sets_key_mgmt_without_secret() {
        let settings = ConnectionSettings::wireless("Airport", "uuid-4", WirelessSecurity::Owe);

        assert_eq!(
            str_value(&settings, "802-11-wireless", "security"),
            "802-11-wireless-security"
        );
        assert_eq!(str_value(&settings, "802-11-wireless-security", "key-mgmt"), "owe");
        assert!(settings.get("802-11-wireless-security", "psk").is_none());
    }

    #[test]
    fn enterprise_profile_builds_8021x_section() {
        let settings = ConnectionSettings::wireless(
            "Corp",
            "uuid-3",
            WirelessSecurity::Enterprise(EnterpriseAuth {
                eap: "peap".into(),
                identity: "alice".into(),
                password: "s3cret".into(),
                phase2: None,
                ca_cert: Some("/etc/ssl/corp.pem".into()),
            }),
        );

        assert_eq!(str_value(&settings, "802-11-wireless-security", "key-mgmt"), "wpa-eap");
        assert_eq!(str_value(&settings, "802-1x", "identity"), "alice");
        assert!(settings.get("802-1x", "phase2-auth").is_none());
        assert!(settings.get("802-1x", "ca-cert").is_some());
    }
}
