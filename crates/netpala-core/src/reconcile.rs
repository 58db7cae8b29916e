// ── Known/scanned reconciliation ──

use std::collections::HashSet;

use crate::model::{KnownNetwork, ScannedNetwork};

/// Drop every scanned network whose SSID already has a saved profile.
///
/// Order is preserved and the result is a fixed point: reconciling it
/// again against the same known list returns it unchanged.
pub fn reconcile(known: &[KnownNetwork], scanned: &[ScannedNetwork]) -> Vec<ScannedNetwork> {
    let known_ssids: HashSet<&str> = known.iter().map(|k| k.ssid.as_str()).collect();
    scanned
        .iter()
        .filter(|s| !known_ssids.contains(s.ssid.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Handle;
    use pretty_assertions::assert_eq;

    fn known(ssid: &str, connected: bool) -> KnownNetwork {
        KnownNetwork {
            handle: Handle::new(format!("/settings/{ssid}")),
            bssid: None,
            ssid: ssid.into(),
            security: "wpa2-psk".into(),
            hidden: false,
            autoconnect: true,
            signal: 0,
            connected,
        }
    }

    fn scanned(ssid: &str, signal: u8) -> ScannedNetwork {
        ScannedNetwork {
            bssid: format!("bssid-{ssid}"),
            ssid: ssid.into(),
            security: "wpa2-psk".into(),
            signal,
        }
    }

    fn ssids(list: &[ScannedNetwork]) -> Vec<&str> {
        list.iter().map(|s| s.ssid.as_str()).collect()
    }

    #[test]
    fn known_network_is_not_offered_as_new() {
        let known = [known("HomeNet", true)];
        let scanned = [scanned("HomeNet", 80), scanned("CafeWifi", 60)];

        let result = reconcile(&known, &scanned);

        assert_eq!(ssids(&result), vec!["CafeWifi"]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let known = [known("A", false), known("C", false)];
        let scanned = [scanned("A", 90), scanned("B", 70), scanned("C", 50), scanned("D", 10)];

        let once = reconcile(&known, &scanned);
        let twice = reconcile(&known, &once);

        assert_eq!(once, twice);
        assert_eq!(ssids(&once), vec!["B", "D"]);
    }

    #[test]
    fn no_result_shares_an_ssid_with_known() {
        let known = [known("X", false), known("Y", true)];
        let scanned = [scanned("Y", 1), scanned("Z", 2), scanned("X", 3), scanned("Y", 4)];

        let result = reconcile(&known, &scanned);

        assert!(result.iter().all(|s| known.iter().all(|k| k.ssid != s.ssid)));
        assert_eq!(ssids(&result), vec!["Z"]);
    }

    #[test]
    fn empty_known_list_keeps_everything() {
        let scanned = [scanned("A", 1), scanned("B", 2)];
        assert_eq!(reconcile(&[], &scanned), scanned.to_vec());
    }
}
