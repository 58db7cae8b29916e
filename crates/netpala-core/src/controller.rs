// ── NetworkManager-backed controller ──
//
// Composes the single-call wrappers of `netpala_nm::NmClient` into the four
// entity lists and routes `Command`s to the matching bus calls. Holds the one
// process-wide bus connection; clones share it.

use std::collections::{HashMap, HashSet};

use netpala_nm::{AccessPointInfo, DeviceInfo, NmClient, SavedProfile, SignalStream};
use tracing::{debug, info, warn};

use crate::backend::NetworkBackend;
use crate::command::{Command, CommandResult, NewProfile};
use crate::convert;
use crate::error::CoreError;
use crate::model::{Device, Handle, KnownNetwork, ScannedNetwork, VpnConnection};

/// Query collaborator over the system bus.
#[derive(Clone, Debug)]
pub struct Controller {
    client: NmClient,
}

impl Controller {
    /// Open the system bus.
    pub async fn connect() -> Result<Self, CoreError> {
        let client = NmClient::system().await.map_err(|e| CoreError::ServiceUnavailable {
            reason: format!("failed to connect to D-Bus: {e}"),
        })?;
        info!("connected to NetworkManager");
        Ok(Self { client })
    }

    pub fn from_client(client: NmClient) -> Self {
        Self { client }
    }

    /// Subscribe to the NetworkManager signals the dashboard reacts to.
    pub async fn signals(&self) -> Result<SignalStream, CoreError> {
        Ok(SignalStream::subscribe(&self.client).await?)
    }

    // ── Shared lookups ───────────────────────────────────────────────

    async fn wifi_devices(&self) -> Result<Vec<DeviceInfo>, CoreError> {
        let mut devices = Vec::new();
        for path in self.client.device_paths().await? {
            let info = self.client.device(&path).await?;
            if info.is_wifi() {
                devices.push(info);
            }
        }
        Ok(devices)
    }

    /// Every access point visible from any Wi-Fi device.
    async fn visible_access_points(
        &self,
        devices: &[DeviceInfo],
    ) -> Result<Vec<AccessPointInfo>, CoreError> {
        let mut aps = Vec::new();
        for device in devices {
            for path in self.client.access_point_paths(&device.path).await? {
                match self.client.access_point(&path).await {
                    Ok(ap) => aps.push(ap),
                    // Access points vanish between listing and reading.
                    Err(e) => debug!(ap = %path, error = %e, "skipping unreadable access point"),
                }
            }
        }
        Ok(aps)
    }

    /// SSIDs the Wi-Fi devices are currently associated with.
    async fn connected_ssids(&self, devices: &[DeviceInfo]) -> Result<HashSet<String>, CoreError> {
        let mut ssids = HashSet::new();
        for device in devices {
            let wireless = self.client.wireless(&device.path).await?;
            if let Some(ap) = wireless.active_access_point {
                let ap = self.client.access_point(&ap).await?;
                if !ap.ssid.is_empty() {
                    ssids.insert(ap.ssid);
                }
            }
        }
        Ok(ssids)
    }

    /// All saved profiles. Profiles whose settings cannot be read are skipped.
    async fn saved_profiles(&self) -> Result<Vec<SavedProfile>, CoreError> {
        let mut profiles = Vec::new();
        for path in self.client.connection_paths().await? {
            match self.client.connection_settings(&path).await {
                Ok(settings) => profiles.push(SavedProfile::new(path, settings)),
                Err(e) => warn!(profile = %path, error = %e, "skipping unreadable profile"),
            }
        }
        Ok(profiles)
    }

    // ── Commands ─────────────────────────────────────────────────────

    async fn activate(&self, connection: &Handle, device: &Handle) -> Result<(), CoreError> {
        self.client
            .activate_connection(connection.as_str(), Some(device.as_str()), None)
            .await
            .map_err(|e| CoreError::command("activate connection", e))?;
        Ok(())
    }

    async fn add_and_activate(
        &self,
        profile: &NewProfile,
        device: &Handle,
    ) -> Result<CommandResult, CoreError> {
        let uuid = uuid::Uuid::new_v4().to_string();
        let settings = profile.to_settings(&uuid);

        let path = self
            .client
            .add_connection(&settings)
            .await
            .map_err(|e| match e {
                netpala_nm::Error::UnreadableReply { .. } => CoreError::from(e),
                other => CoreError::command("add connection", other),
            })?;
        info!(ssid = %profile.ssid, profile = %path, "saved new profile");

        let connection = Handle::new(path);
        self.activate(&connection, device).await?;
        Ok(CommandResult::Added { connection })
    }

    async fn toggle_vpn(
        &self,
        connection: &Handle,
        active: Option<&Handle>,
        currently_active: bool,
    ) -> Result<(), CoreError> {
        if currently_active {
            let active = active.ok_or_else(|| CoreError::NoActiveInstance {
                connection: connection.to_string(),
            })?;
            self.client
                .deactivate_connection(active.as_str())
                .await
                .map_err(|e| {
                    CoreError::command(format!("deactivate vpn connection '{connection}'"), e)
                })?;
        } else {
            self.client
                .activate_connection(connection.as_str(), None, None)
                .await
                .map_err(|e| {
                    CoreError::command(format!("activate vpn connection '{connection}'"), e)
                })?;
        }
        Ok(())
    }
}

impl NetworkBackend for Controller {
    async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let manager = self.client.manager_state().await?;
        let mut profiles: Option<Vec<SavedProfile>> = None;
        let mut devices = Vec::new();

        for info in self.wifi_devices().await? {
            let wireless = self.client.wireless(&info.path).await?;
            let active_ap = match wireless.active_access_point.as_deref() {
                Some(path) => Some(self.client.access_point(path).await?),
                None => None,
            };
            // Profiles are only needed to label an active link.
            if active_ap.is_some() && profiles.is_none() {
                profiles = Some(self.saved_profiles().await?);
            }
            devices.push(convert::device(
                info,
                &wireless,
                &manager,
                active_ap.as_ref(),
                profiles.as_deref().unwrap_or_default(),
            ));
        }
        Ok(devices)
    }

    async fn list_known_networks(&self) -> Result<Vec<KnownNetwork>, CoreError> {
        let devices = self.wifi_devices().await?;
        let visible = self.visible_access_points(&devices).await?;
        let connected = self.connected_ssids(&devices).await?;
        let profiles = self.saved_profiles().await?;
        Ok(convert::known_networks(&profiles, &visible, &connected))
    }

    async fn list_scanned_networks(&self) -> Result<Vec<ScannedNetwork>, CoreError> {
        let devices = self.wifi_devices().await?;
        let visible = self.visible_access_points(&devices).await?;
        Ok(convert::scanned_networks(&visible))
    }

    async fn list_vpn_connections(&self) -> Result<Vec<VpnConnection>, CoreError> {
        let manager = self.client.manager_state().await?;
        let mut active = HashMap::new();
        for path in manager.active_connections {
            match self.client.active_connection_profile(&path).await {
                Ok(Some(profile)) => {
                    active.insert(profile, path);
                }
                Ok(None) => {}
                // Active connections are torn down concurrently.
                Err(e) => debug!(active = %path, error = %e, "skipping active connection"),
            }
        }
        let profiles = self.saved_profiles().await?;
        Ok(convert::vpn_connections(&profiles, &active))
    }

    async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(command = command.name(), "executing command");
        match command {
            Command::Activate { connection, device } => {
                self.activate(&connection, &device).await?;
            }
            Command::AddAndActivate { profile, device } => {
                return self.add_and_activate(&profile, &device).await;
            }
            Command::Delete { connection } => {
                self.client
                    .delete_connection(connection.as_str())
                    .await
                    .map_err(|e| {
                        CoreError::command(format!("delete connection {connection}"), e)
                    })?;
            }
            Command::SetRadioPower { enabled } => {
                self.client
                    .set_wireless_enabled(enabled)
                    .await
                    .map_err(|e| CoreError::command("set WirelessEnabled property", e))?;
            }
            Command::ToggleVpn {
                connection,
                active,
                currently_active,
            } => {
                self.toggle_vpn(&connection, active.as_ref(), currently_active)
                    .await?;
            }
            Command::RequestRescan { device } => {
                self.client
                    .request_scan(device.as_str())
                    .await
                    .map_err(|e| CoreError::command("request scan", e))?;
            }
        }
        Ok(CommandResult::Ok)
    }
}
