//! The pure transition function: `(Model, Action) -> Vec<Effect>`.
//!
//! Nothing here awaits or touches the bus. Key routing is layered: quit
//! keys first, then the error screen, then whichever modal owns input,
//! then the password prompt, and only then list navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;
use tracing::debug;

use netpala_core::{
    Command, CoreError, EntityKind, EntityUpdate, NewProfile, ScanUpdate, SecurityKind,
    SignalCategory,
};

use crate::action::{Action, Effect};
use crate::component::Component;
use crate::state::{BoxId, KnownRow, Modal, Model};
use crate::widgets::confirm::ConfirmDialog;
use crate::widgets::credential_form::{CredentialForm, FormOutcome};
use crate::widgets::prompt::{PasswordPrompt, PromptOutcome};

pub fn update(model: &mut Model, action: Action) -> Vec<Effect> {
    let effects = match action {
        Action::Startup => vec![Effect::Query {
            kinds: EntityKind::iter().collect(),
            rearm: true,
        }],
        Action::Key(key) => handle_key(model, key),
        Action::Notified(category) => handle_notified(model, category),
        Action::DebounceElapsed { generation } => {
            if generation == model.scan_generation {
                vec![query(vec![EntityKind::Scanned])]
            } else {
                debug!(generation, current = model.scan_generation, "stale debounce timer");
                Vec::new()
            }
        }
        Action::PeriodicRefresh => vec![query(EntityKind::iter().collect())],
        Action::Refresh(kinds) => vec![query(kinds)],
        Action::Refreshed(update) => {
            model.snapshot.apply(update);
            Vec::new()
        }
        Action::RefreshDone { rearm } => {
            // Dialogs re-arm on exit instead.
            if rearm && model.modal.is_browse() {
                arm_listener(model).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Action::Failed(message) => {
            model.error = Some(message);
            Vec::new()
        }
    };
    model.nav.clamp(&model.snapshot);
    effects
}

fn query(kinds: Vec<EntityKind>) -> Effect {
    Effect::Query {
        kinds,
        rearm: false,
    }
}

/// Grant the listener one more signal, unless it already holds a grant.
fn arm_listener(model: &mut Model) -> Option<Effect> {
    if model.listener_armed {
        None
    } else {
        model.listener_armed = true;
        Some(Effect::ArmListener)
    }
}

fn fail(model: &mut Model, err: &CoreError) -> Vec<Effect> {
    model.error = Some(err.to_string());
    Vec::new()
}

// ── Notifications ───────────────────────────────────────────────────

fn handle_notified(model: &mut Model, category: SignalCategory) -> Vec<Effect> {
    debug!(%category, "signal classified");
    model.listener_armed = false;

    match category {
        SignalCategory::ScanResults => {
            model
                .snapshot
                .apply(EntityUpdate::Scanned(ScanUpdate::RescanRequested));
            model.scan_generation += 1;
            let generation = model.scan_generation;
            arm_listener(model)
                .into_iter()
                .chain([Effect::Debounce { generation }])
                .collect()
        }
        SignalCategory::Unrecognized => arm_listener(model).into_iter().collect(),
        other => vec![Effect::Query {
            kinds: other.refresh_kinds().to_vec(),
            rearm: true,
        }],
    }
}

// ── Keys ────────────────────────────────────────────────────────────

fn handle_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        model.should_quit = true;
        return Vec::new();
    }

    if model.error.is_some() {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            model.should_quit = true;
        }
        return Vec::new();
    }

    match &mut model.modal {
        Modal::CredentialForm(form) => {
            let outcome = form.handle_key_event(key);
            return outcome.map_or_else(Vec::new, |o| finish_form(model, o));
        }
        Modal::ConfirmDialog(dialog) => {
            let outcome = dialog.handle_key_event(key);
            return outcome.map_or_else(Vec::new, |confirmed| finish_confirm(model, confirmed));
        }
        Modal::Browse => {}
    }

    if let Some(prompt) = model.prompt.as_mut() {
        let outcome = prompt.handle_key_event(key);
        return outcome.map_or_else(Vec::new, |o| finish_prompt(model, o));
    }

    handle_browse_key(model, key)
}

fn handle_browse_key(model: &mut Model, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('q') => {
            model.should_quit = true;
            Vec::new()
        }
        KeyCode::Char('r') => rescan(model),
        KeyCode::Up | KeyCode::Char('k') => {
            model.nav.up();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            model.nav.down(&model.snapshot);
            Vec::new()
        }
        KeyCode::Tab => {
            model.nav.next_box(&model.snapshot);
            Vec::new()
        }
        KeyCode::BackTab => {
            model.nav.prev_box(&model.snapshot);
            Vec::new()
        }
        KeyCode::Enter | KeyCode::Char(' ') => select(model),
        KeyCode::Delete => {
            request_delete(model);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

// ── Box actions ─────────────────────────────────────────────────────

fn select(model: &mut Model) -> Vec<Effect> {
    let entry = model.nav.selected_entry;
    match model.nav.selected_box {
        BoxId::Device => {
            let Some(device) = model.snapshot.first_device() else {
                return fail(model, &CoreError::NoWifiDevice);
            };
            vec![Effect::Execute(Command::SetRadioPower {
                enabled: !device.powered,
            })]
        }
        BoxId::Station => Vec::new(),
        BoxId::Vpn => {
            let Some(vpn) = model.snapshot.vpns().get(entry) else {
                return Vec::new();
            };
            if model.snapshot.first_device().is_none() {
                return fail(model, &CoreError::NoWifiDevice);
            }
            vec![Effect::Execute(Command::ToggleVpn {
                connection: vpn.handle.clone(),
                active: vpn.active.clone(),
                currently_active: vpn.connected,
            })]
        }
        BoxId::Known => {
            let connection = match model.snapshot.known_row(entry) {
                Some(KnownRow::Saved(known)) => known.handle.clone(),
                Some(KnownRow::Pending(pending)) => {
                    debug!(ssid = %pending.ssid, "profile not saved yet");
                    return Vec::new();
                }
                None => return Vec::new(),
            };
            let Some(device) = model.snapshot.first_device() else {
                return fail(model, &CoreError::NoWifiDevice);
            };
            vec![Effect::Execute(Command::Activate {
                connection,
                device: device.handle.clone(),
            })]
        }
        BoxId::Scanned => {
            let Some(network) = model.snapshot.scanned().get(entry).cloned() else {
                return Vec::new();
            };
            if model.snapshot.first_device().is_none() {
                return fail(model, &CoreError::NoWifiDevice);
            }
            let kind = network.security_kind();
            let ssid = network.ssid.clone();
            let security = network.security.clone();
            model.selected_network = Some(network);
            match kind {
                SecurityKind::Enterprise => {
                    model.modal = Modal::CredentialForm(CredentialForm::new(ssid));
                    Vec::new()
                }
                SecurityKind::Open => add_and_connect(model, NewProfile::open(ssid, security)),
                SecurityKind::Personal => {
                    model.prompt = Some(PasswordPrompt::new());
                    Vec::new()
                }
            }
        }
    }
}

fn request_delete(model: &mut Model) {
    if model.nav.selected_box != BoxId::Known {
        return;
    }
    if let Some(KnownRow::Saved(known)) = model.snapshot.known_row(model.nav.selected_entry) {
        model.modal = Modal::ConfirmDialog(ConfirmDialog::delete_known(
            known.handle.clone(),
            &known.ssid,
        ));
    }
}

fn rescan(model: &mut Model) -> Vec<Effect> {
    let Some(device) = model.snapshot.first_device() else {
        return fail(model, &CoreError::NoWifiDevice);
    };
    vec![
        Effect::Execute(Command::RequestRescan {
            device: device.handle.clone(),
        }),
        query(vec![EntityKind::Known]),
        Effect::Schedule {
            delay: model.timings.rescan_status_delay,
            action: Box::new(Action::Refresh(vec![EntityKind::Devices])),
        },
    ]
}

/// Save and activate a new profile on the first device, showing it as
/// pending until the delayed known-network refresh lands.
fn add_and_connect(model: &mut Model, profile: NewProfile) -> Vec<Effect> {
    let Some(device) = model.snapshot.first_device() else {
        return fail(model, &CoreError::NoWifiDevice);
    };
    let device = device.handle.clone();
    model
        .snapshot
        .add_pending(profile.ssid.clone(), profile.security.clone());
    vec![
        Effect::Execute(Command::AddAndActivate { profile, device }),
        Effect::Schedule {
            delay: model.timings.known_refresh_delay,
            action: Box::new(Action::Refresh(vec![EntityKind::Known])),
        },
    ]
}

// ── Sub-dialog outcomes ─────────────────────────────────────────────

fn finish_prompt(model: &mut Model, outcome: PromptOutcome) -> Vec<Effect> {
    model.prompt = None;
    let PromptOutcome::Submit(passphrase) = outcome else {
        model.selected_network = None;
        return Vec::new();
    };
    let Some(network) = model.selected_network.take() else {
        return Vec::new();
    };
    add_and_connect(
        model,
        NewProfile::personal(network.ssid, network.security, passphrase),
    )
}

fn finish_form(model: &mut Model, outcome: FormOutcome) -> Vec<Effect> {
    model.modal = Modal::Browse;
    let mut effects: Vec<Effect> = arm_listener(model).into_iter().collect();

    let FormOutcome::Submit(config) = outcome else {
        model.selected_network = None;
        return effects;
    };
    model.nav.selected_entry = 0;
    model.selected_network = None;

    if model.snapshot.first_device().is_none() {
        model.error = Some(CoreError::NoWifiDeviceToConnect.to_string());
        return effects;
    }
    match NewProfile::enterprise(config) {
        Ok(profile) => effects.extend(add_and_connect(model, profile)),
        Err(e) => model.error = Some(e.to_string()),
    }
    effects
}

fn finish_confirm(model: &mut Model, confirmed: bool) -> Vec<Effect> {
    let Modal::ConfirmDialog(dialog) = std::mem::take(&mut model.modal) else {
        return Vec::new();
    };
    let mut effects: Vec<Effect> = Vec::new();
    if confirmed {
        effects.push(Effect::Execute(Command::Delete {
            connection: dialog.target,
        }));
    }
    effects.extend(arm_listener(model));
    effects
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::state::snapshot::fixtures::{device, known, scanned, vpn};
    use crate::state::{BoxLengths, Navigation};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(model: &mut Model, codes: &[KeyCode]) -> Vec<Effect> {
        codes.iter().flat_map(|c| update(model, key(*c))).collect()
    }

    fn type_text(model: &mut Model, text: &str) -> Vec<Effect> {
        text.chars().flat_map(|c| update(model, key(KeyCode::Char(c)))).collect()
    }

    /// A browsing model with one device, `HomeNet` saved and connected, and
    /// three visible networks.
    fn populated() -> Model {
        let mut model = Model::default();
        model.listener_armed = true;
        model
            .snapshot
            .apply(EntityUpdate::Devices(vec![device("wlan0", true)]));
        model
            .snapshot
            .apply(EntityUpdate::Known(vec![known("HomeNet", true)]));
        model.snapshot.apply(EntityUpdate::Scanned(ScanUpdate::Results(vec![
            scanned("HomeNet", "wpa2-psk", 90),
            scanned("CafeWifi", "open", 70),
            scanned("Corp", "wpa2-eap", 60),
            scanned("Flat3", "wpa3-sae", 40),
        ])));
        model
    }

    fn focus(model: &mut Model, selected_box: BoxId, selected_entry: usize) {
        model.nav = Navigation {
            selected_box,
            selected_entry,
        };
    }

    fn commands(effects: &[Effect]) -> Vec<&Command> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Execute(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn arm_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::ArmListener))
            .count()
    }

    // ── Reconciliation ──

    #[test]
    fn known_network_never_listed_as_new() {
        let model = populated();
        let ssids: Vec<&str> = model.snapshot.scanned().iter().map(|s| s.ssid.as_str()).collect();
        assert_eq!(ssids, vec!["CafeWifi", "Corp", "Flat3"]);
    }

    // ── Connect flows ──

    #[test]
    fn open_network_connects_without_modal() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 0);

        let effects = update(&mut model, key(KeyCode::Enter));

        assert!(model.modal.is_browse());
        assert!(!model.is_typing());
        let cmds = commands(&effects);
        assert_eq!(cmds.len(), 1);
        let Command::AddAndActivate { profile, device } = cmds[0] else {
            panic!("expected add-and-activate, got {cmds:?}");
        };
        assert_eq!(profile.ssid, "CafeWifi");
        assert!(matches!(profile.credential, netpala_core::Credential::None));
        assert_eq!(device.as_str(), "/org/freedesktop/NetworkManager/Devices/wlan0");

        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Schedule { action, .. }
                if matches!(action.as_ref(), Action::Refresh(kinds) if kinds == &[EntityKind::Known])
        )));
        // Shown optimistically as known, and no longer as new.
        assert!(matches!(model.snapshot.known_row(1), Some(KnownRow::Pending(p)) if p.ssid == "CafeWifi"));
        assert!(model.snapshot.scanned().iter().all(|s| s.ssid != "CafeWifi"));
    }

    #[test]
    fn owe_network_connects_without_password() {
        let mut model = populated();
        model.snapshot.apply(EntityUpdate::Scanned(ScanUpdate::Results(vec![scanned(
            "Airport", "wpa-owe", 75,
        )])));
        focus(&mut model, BoxId::Scanned, 0);

        let effects = update(&mut model, key(KeyCode::Enter));

        assert!(!model.is_typing());
        let cmds = commands(&effects);
        let [Command::AddAndActivate { profile, .. }] = cmds.as_slice() else {
            panic!("expected one add-and-activate, got {cmds:?}");
        };
        assert_eq!(profile.ssid, "Airport");
        assert_eq!(profile.security, "wpa-owe");
        assert!(matches!(profile.credential, netpala_core::Credential::None));
    }

    #[test]
    fn password_prompt_uses_network_captured_at_start() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 2);
        assert!(update(&mut model, key(KeyCode::Enter)).is_empty());
        assert!(model.is_typing());

        // Arrow keys go to the prompt, not the selection.
        press(&mut model, &[KeyCode::Up, KeyCode::Up]);
        assert_eq!(model.nav.selected_entry, 2);
        // A refresh reorders the list underneath the prompt.
        model.snapshot.apply(EntityUpdate::Scanned(ScanUpdate::Results(vec![
            scanned("Flat3", "wpa3-sae", 95),
            scanned("CafeWifi", "open", 70),
        ])));
        model.nav.selected_entry = 0;

        type_text(&mut model, "s3cret");
        let effects = update(&mut model, key(KeyCode::Enter));

        assert!(!model.is_typing());
        let cmds = commands(&effects);
        let [Command::AddAndActivate { profile, .. }] = cmds.as_slice() else {
            panic!("expected one add-and-activate, got {cmds:?}");
        };
        assert_eq!(profile.ssid, "Flat3");
        assert_eq!(profile.security, "wpa3-sae");
        assert!(matches!(profile.credential, netpala_core::Credential::Passphrase(_)));
    }

    #[test]
    fn escape_leaves_prompt_without_command() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 2);
        update(&mut model, key(KeyCode::Enter));
        type_text(&mut model, "abc");

        let effects = update(&mut model, key(KeyCode::Esc));

        assert!(effects.is_empty());
        assert!(!model.is_typing());
        assert!(!model.should_quit);
        assert!(model.selected_network.is_none());
    }

    #[test]
    fn q_is_text_while_typing() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 2);
        update(&mut model, key(KeyCode::Enter));
        update(&mut model, key(KeyCode::Char('q')));
        assert!(!model.should_quit);
        assert!(model.is_typing());
    }

    #[test]
    fn enterprise_form_submits_exactly_once_and_returns_to_browse() {
        let mut model = populated();
        model.listener_armed = false;
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));
        assert!(matches!(&model.modal, Modal::CredentialForm(f) if f.ssid() == "Corp"));

        // Method: TTLS; phase 2 default; identity; password; CA cert; submit.
        let mut effects = press(&mut model, &[KeyCode::Right, KeyCode::Tab, KeyCode::Tab]);
        effects.extend(type_text(&mut model, "alice"));
        effects.extend(press(&mut model, &[KeyCode::Tab]));
        effects.extend(type_text(&mut model, "pw"));
        effects.extend(press(&mut model, &[KeyCode::Tab]));
        effects.extend(type_text(&mut model, "/etc/ca.pem"));
        assert!(effects.is_empty());

        let effects = press(&mut model, &[KeyCode::Tab, KeyCode::Enter]);

        assert!(model.modal.is_browse());
        assert_eq!(model.nav.selected_entry, 0);
        assert_eq!(arm_count(&effects), 1);
        let cmds = commands(&effects);
        let [Command::AddAndActivate { profile, .. }] = cmds.as_slice() else {
            panic!("expected one add-and-activate, got {cmds:?}");
        };
        assert_eq!(profile.ssid, "Corp");
        assert_eq!(profile.security, "wpa2-eap");
        let netpala_core::Credential::Enterprise(config) = &profile.credential else {
            panic!("expected enterprise credential");
        };
        assert_eq!(config.identity, "alice");
        assert_eq!(config.ca_cert, "/etc/ca.pem");
    }

    #[test]
    fn enterprise_validation_failure_issues_nothing() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));

        // Submit without touching anything: no EAP method chosen.
        let effects = press(&mut model, &[KeyCode::BackTab, KeyCode::Enter]);

        assert!(commands(&effects).is_empty());
        assert!(model.modal.is_browse());
        assert_eq!(model.error.as_deref(), Some("EAP config is missing EAP method"));
    }

    #[test]
    fn form_cancel_discards() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));
        let effects = update(&mut model, key(KeyCode::Esc));
        assert!(model.modal.is_browse());
        assert!(commands(&effects).is_empty());
        assert!(model.error.is_none());
    }

    // ── Modal exclusivity ──

    #[test]
    fn modal_input_never_moves_selection() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));
        let before = model.nav;

        press(
            &mut model,
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::Char('j'),
                KeyCode::Char('q'),
                KeyCode::Char('r'),
                KeyCode::Delete,
            ],
        );
        assert_eq!(model.nav, before);
        assert!(!model.should_quit);

        let mut model = populated();
        focus(&mut model, BoxId::Known, 0);
        update(&mut model, key(KeyCode::Delete));
        let before = model.nav;
        press(&mut model, &[KeyCode::Down, KeyCode::Tab, KeyCode::Left, KeyCode::Up]);
        assert!(matches!(model.modal, Modal::ConfirmDialog(_)));
        assert_eq!(model.nav, before);
    }

    // ── Delete flow ──

    #[test]
    fn declined_delete_issues_nothing_and_rearms_once() {
        let mut model = populated();
        focus(&mut model, BoxId::Known, 0);
        update(&mut model, key(KeyCode::Delete));
        let Modal::ConfirmDialog(dialog) = &model.modal else {
            panic!("expected confirm dialog");
        };
        assert_eq!(
            dialog.message,
            "Are you sure you want to delete the known network 'HomeNet'?"
        );

        // A signal arrives while the dialog is open; its refresh completes
        // but the re-arm waits for the dialog.
        let mut effects = update(&mut model, Action::Notified(SignalCategory::ProfileList));
        effects.extend(update(&mut model, Action::RefreshDone { rearm: true }));
        assert_eq!(arm_count(&effects), 0);

        let effects = update(&mut model, key(KeyCode::Enter));

        assert!(model.modal.is_browse());
        assert!(commands(&effects).is_empty());
        assert_eq!(arm_count(&effects), 1);
        assert!(model.listener_armed);
    }

    #[test]
    fn confirmed_delete_issues_delete() {
        let mut model = populated();
        focus(&mut model, BoxId::Known, 0);
        update(&mut model, key(KeyCode::Delete));
        let effects = press(&mut model, &[KeyCode::Right, KeyCode::Enter]);

        let cmds = commands(&effects);
        let [Command::Delete { connection }] = cmds.as_slice() else {
            panic!("expected delete, got {cmds:?}");
        };
        assert_eq!(
            connection.as_str(),
            "/org/freedesktop/NetworkManager/Settings/HomeNet"
        );
        // Listener already held its grant.
        assert_eq!(arm_count(&effects), 0);
    }

    #[test]
    fn delete_outside_known_box_is_ignored() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 0);
        update(&mut model, key(KeyCode::Delete));
        assert!(model.modal.is_browse());
    }

    // ── Box actions ──

    #[test]
    fn device_box_toggles_radio() {
        let mut model = populated();
        let effects = update(&mut model, key(KeyCode::Char(' ')));
        assert!(matches!(
            commands(&effects).as_slice(),
            [Command::SetRadioPower { enabled: false }]
        ));
    }

    #[test]
    fn known_box_activates_on_first_device() {
        let mut model = populated();
        focus(&mut model, BoxId::Known, 0);
        let effects = update(&mut model, key(KeyCode::Enter));
        let cmds = commands(&effects);
        let [Command::Activate { connection, device }] = cmds.as_slice() else {
            panic!("expected activate, got {cmds:?}");
        };
        assert_eq!(connection.as_str(), "/org/freedesktop/NetworkManager/Settings/HomeNet");
        assert_eq!(device.as_str(), "/org/freedesktop/NetworkManager/Devices/wlan0");
    }

    #[test]
    fn vpn_box_toggles_with_active_handle() {
        let mut model = populated();
        model
            .snapshot
            .apply(EntityUpdate::Vpns(vec![vpn("office", true), vpn("home", false)]));
        focus(&mut model, BoxId::Vpn, 0);

        let effects = update(&mut model, key(KeyCode::Enter));

        let cmds = commands(&effects);
        let [Command::ToggleVpn {
            active,
            currently_active,
            ..
        }] = cmds.as_slice()
        else {
            panic!("expected toggle, got {cmds:?}");
        };
        assert!(*currently_active);
        assert!(active.is_some());
    }

    #[test]
    fn missing_device_is_a_visible_error() {
        let mut model = populated();
        model.snapshot.apply(EntityUpdate::Devices(Vec::new()));
        focus(&mut model, BoxId::Scanned, 0);

        let effects = update(&mut model, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(model.error.as_deref(), Some("no wifi device found"));
    }

    #[test]
    fn form_submit_without_device_reports_connect_error() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));
        model.snapshot.apply(EntityUpdate::Devices(Vec::new()));

        let effects = press(
            &mut model,
            &[KeyCode::Enter, KeyCode::BackTab, KeyCode::BackTab, KeyCode::Enter],
        );

        assert!(commands(&effects).is_empty());
        assert_eq!(model.error.as_deref(), Some("no wifi device found to connect with"));
    }

    #[test]
    fn rescan_requests_scan_and_follow_ups() {
        let mut model = populated();
        let effects = update(&mut model, key(KeyCode::Char('r')));

        assert!(matches!(
            effects.as_slice(),
            [
                Effect::Execute(Command::RequestRescan { .. }),
                Effect::Query { rearm: false, .. },
                Effect::Schedule { .. },
            ]
        ));
    }

    // ── Notifications ──

    #[test]
    fn notification_refreshes_then_rearms_once() {
        let mut model = populated();

        let effects = update(&mut model, Action::Notified(SignalCategory::DeviceTopology));
        assert!(!model.listener_armed);
        let [Effect::Query { kinds, rearm: true }] = effects.as_slice() else {
            panic!("expected query, got {effects:?}");
        };
        assert_eq!(kinds, &[EntityKind::Devices, EntityKind::Known]);

        let effects = update(&mut model, Action::RefreshDone { rearm: true });
        assert_eq!(arm_count(&effects), 1);

        // A periodic batch completing does not arm again.
        let effects = update(&mut model, Action::RefreshDone { rearm: false });
        assert_eq!(arm_count(&effects), 0);
    }

    #[test]
    fn scan_notifications_rearm_immediately_and_debounce() {
        let mut model = populated();
        let mut generations = Vec::new();
        for _ in 0..5 {
            let effects = update(&mut model, Action::Notified(SignalCategory::ScanResults));
            assert_eq!(arm_count(&effects), 1);
            for effect in effects {
                if let Effect::Debounce { generation } = effect {
                    generations.push(generation);
                }
            }
        }
        assert_eq!(generations, vec![1, 2, 3, 4, 5]);
        // The scanned list is untouched by the marker.
        assert_eq!(model.snapshot.box_len(BoxId::Scanned), 3);

        assert!(update(&mut model, Action::DebounceElapsed { generation: 3 }).is_empty());
        let effects = update(&mut model, Action::DebounceElapsed { generation: 5 });
        assert!(matches!(
            effects.as_slice(),
            [Effect::Query { kinds, rearm: false }] if kinds == &[EntityKind::Scanned]
        ));
    }

    #[test]
    fn periodic_refresh_queries_everything() {
        let mut model = populated();
        let effects = update(&mut model, Action::PeriodicRefresh);
        let [Effect::Query { kinds, rearm: false }] = effects.as_slice() else {
            panic!("expected query, got {effects:?}");
        };
        assert_eq!(kinds.len(), 4);
    }

    // ── Error state & quitting ──

    #[test]
    fn error_state_swallows_keys_until_quit() {
        let mut model = populated();
        update(&mut model, Action::Failed("failed to add connection: boom".into()));

        assert!(press(&mut model, &[KeyCode::Enter, KeyCode::Char('r')]).is_empty());
        assert!(!model.should_quit);

        update(&mut model, key(KeyCode::Esc));
        assert!(model.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_a_modal() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 1);
        update(&mut model, key(KeyCode::Enter));
        update(
            &mut model,
            Action::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(model.should_quit);
    }

    #[test]
    fn selection_is_clamped_after_lists_shrink() {
        let mut model = populated();
        focus(&mut model, BoxId::Scanned, 2);
        update(
            &mut model,
            Action::Refreshed(EntityUpdate::Scanned(ScanUpdate::Results(vec![scanned(
                "CafeWifi", "open", 70,
            )]))),
        );
        assert_eq!(model.nav.selected_entry, 0);
    }
}
