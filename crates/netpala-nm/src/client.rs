// NetworkManager D-Bus client
//
// Thin async wrappers over the NetworkManager object tree. Each method maps
// to exactly one bus call; composing calls into domain snapshots is the job
// of `netpala-core`.

use std::collections::HashMap;

use tracing::debug;
use zbus::zvariant::{ObjectPath, OwnedObjectPath, Value};
use zbus::{Connection, Proxy};

use crate::error::{Error, Result};
use crate::settings::ConnectionSettings;
use crate::types::{AccessPointInfo, DeviceInfo, ManagerState, WirelessInfo};
use crate::value::{PropertyMap, PropertyMapExt, SettingsMap};

// ── Well-known names ─────────────────────────────────────────────────

pub const NM_BUS: &str = "org.freedesktop.NetworkManager";
pub const NM_PATH: &str = "/org/freedesktop/NetworkManager";
pub const SETTINGS_PATH: &str = "/org/freedesktop/NetworkManager/Settings";

pub const NM_IFACE: &str = "org.freedesktop.NetworkManager";
pub const DEVICE_IFACE: &str = "org.freedesktop.NetworkManager.Device";
pub const WIRELESS_IFACE: &str = "org.freedesktop.NetworkManager.Device.Wireless";
pub const ACCESS_POINT_IFACE: &str = "org.freedesktop.NetworkManager.AccessPoint";
pub const SETTINGS_IFACE: &str = "org.freedesktop.NetworkManager.Settings";
pub const CONNECTION_IFACE: &str = "org.freedesktop.NetworkManager.Settings.Connection";
pub const ACTIVE_CONNECTION_IFACE: &str = "org.freedesktop.NetworkManager.Connection.Active";
pub const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

/// Handle to the system bus, scoped to the NetworkManager service.
///
/// Cheap to clone: the underlying [`Connection`] is reference counted, so
/// every clone shares the single process-wide bus connection.
#[derive(Clone, Debug)]
pub struct NmClient {
    conn: Connection,
}

impl NmClient {
    /// Open the system bus.
    pub async fn system() -> Result<Self> {
        let conn = Connection::system().await?;
        debug!(unique_name = ?conn.unique_name(), "connected to system bus");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn proxy<'a>(&'a self, path: &'a str, interface: &'a str) -> Result<Proxy<'a>> {
        Ok(Proxy::new(&self.conn, NM_BUS, path, interface).await?)
    }

    // ── Properties ───────────────────────────────────────────────────

    /// `org.freedesktop.DBus.Properties.GetAll` on one interface.
    pub async fn properties(&self, path: &str, interface: &str) -> Result<PropertyMap> {
        let proxy = self.proxy(path, PROPERTIES_IFACE).await?;
        Ok(proxy.call("GetAll", &(interface,)).await?)
    }

    /// Radio switches and the active-connection list.
    pub async fn manager_state(&self) -> Result<ManagerState> {
        let props = self.properties(NM_PATH, NM_IFACE).await?;
        Ok(ManagerState::from_properties(&props))
    }

    pub async fn device(&self, path: &str) -> Result<DeviceInfo> {
        let props = self.properties(path, DEVICE_IFACE).await?;
        DeviceInfo::from_properties(path, &props)
    }

    pub async fn wireless(&self, path: &str) -> Result<WirelessInfo> {
        let props = self.properties(path, WIRELESS_IFACE).await?;
        Ok(WirelessInfo::from_properties(&props))
    }

    pub async fn access_point(&self, path: &str) -> Result<AccessPointInfo> {
        let props = self.properties(path, ACCESS_POINT_IFACE).await?;
        Ok(AccessPointInfo::from_properties(path, &props))
    }

    /// The saved profile an active connection was started from.
    pub async fn active_connection_profile(&self, active: &str) -> Result<Option<String>> {
        let props = self.properties(active, ACTIVE_CONNECTION_IFACE).await?;
        Ok(props.object_path("Connection"))
    }

    // ── Enumeration ──────────────────────────────────────────────────

    pub async fn device_paths(&self) -> Result<Vec<String>> {
        let proxy = self.proxy(NM_PATH, NM_IFACE).await?;
        let paths: Vec<OwnedObjectPath> = proxy.call("GetDevices", &()).await?;
        Ok(paths.into_iter().map(|p| p.as_str().to_owned()).collect())
    }

    pub async fn access_point_paths(&self, device: &str) -> Result<Vec<String>> {
        let proxy = self.proxy(device, WIRELESS_IFACE).await?;
        let paths: Vec<OwnedObjectPath> = proxy.call("GetAllAccessPoints", &()).await?;
        Ok(paths.into_iter().map(|p| p.as_str().to_owned()).collect())
    }

    pub async fn connection_paths(&self) -> Result<Vec<String>> {
        let proxy = self.proxy(SETTINGS_PATH, SETTINGS_IFACE).await?;
        let paths: Vec<OwnedObjectPath> = proxy.call("ListConnections", &()).await?;
        Ok(paths.into_iter().map(|p| p.as_str().to_owned()).collect())
    }

    /// `GetSettings` on a saved profile. Secrets are never included.
    pub async fn connection_settings(&self, path: &str) -> Result<SettingsMap> {
        let proxy = self.proxy(path, CONNECTION_IFACE).await?;
        Ok(proxy.call("GetSettings", &()).await?)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// `ActivateConnection(connection, device, specific_object)`.
    ///
    /// `None` for either optional argument sends the root path, which
    /// NetworkManager reads as "pick one".
    pub async fn activate_connection(
        &self,
        connection: &str,
        device: Option<&str>,
        specific_object: Option<&str>,
    ) -> Result<String> {
        let proxy = self.proxy(NM_PATH, NM_IFACE).await?;
        let body = (
            ObjectPath::try_from(connection)?,
            ObjectPath::try_from(device.unwrap_or("/"))?,
            ObjectPath::try_from(specific_object.unwrap_or("/"))?,
        );
        let active: OwnedObjectPath = proxy.call("ActivateConnection", &body).await?;
        debug!(connection, active = %active.as_str(), "connection activation started");
        Ok(active.as_str().to_owned())
    }

    pub async fn deactivate_connection(&self, active: &str) -> Result<()> {
        let proxy = self.proxy(NM_PATH, NM_IFACE).await?;
        proxy
            .call::<_, _, ()>("DeactivateConnection", &(ObjectPath::try_from(active)?,))
            .await?;
        Ok(())
    }

    /// `Settings.AddConnection`. Returns the new profile's path.
    ///
    /// The profile exists once the call succeeds, even when its reply
    /// cannot be decoded; that case is reported as [`Error::UnreadableReply`]
    /// so callers can still follow up with a refresh.
    pub async fn add_connection(&self, settings: &ConnectionSettings) -> Result<String> {
        let proxy = self.proxy(SETTINGS_PATH, SETTINGS_IFACE).await?;
        let reply = proxy.call_method("AddConnection", &(settings.as_dict(),)).await?;
        let path: OwnedObjectPath =
            reply
                .body()
                .deserialize()
                .map_err(|e: zbus::Error| Error::UnreadableReply {
                    method: "AddConnection",
                    reason: e.to_string(),
                })?;
        Ok(path.as_str().to_owned())
    }

    pub async fn delete_connection(&self, path: &str) -> Result<()> {
        let proxy = self.proxy(path, CONNECTION_IFACE).await?;
        proxy.call::<_, _, ()>("Delete", &()).await?;
        Ok(())
    }

    pub async fn request_scan(&self, device: &str) -> Result<()> {
        let proxy = self.proxy(device, WIRELESS_IFACE).await?;
        let options: HashMap<&str, Value<'_>> = HashMap::new();
        proxy.call::<_, _, ()>("RequestScan", &(options,)).await?;
        Ok(())
    }

    /// Flip the global Wi-Fi radio switch.
    pub async fn set_wireless_enabled(&self, enabled: bool) -> Result<()> {
        let proxy = self.proxy(NM_PATH, PROPERTIES_IFACE).await?;
        proxy
            .call::<_, _, ()>("Set", &(NM_IFACE, "WirelessEnabled", Value::from(enabled)))
            .await?;
        Ok(())
    }
}
