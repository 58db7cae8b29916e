// ── Query collaborator ──
//
// The seam between the dashboard and NetworkManager. Every call is
// fire-and-collect and fails independently with a `CoreError`.

use std::future::Future;

use crate::command::{Command, CommandResult};
use crate::error::CoreError;
use crate::model::{
    Device, EntityKind, EntityUpdate, KnownNetwork, ScanUpdate, ScannedNetwork, VpnConnection,
};

/// Source of entity lists and sink for commands.
pub trait NetworkBackend: Send + Sync {
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, CoreError>> + Send;

    fn list_known_networks(
        &self,
    ) -> impl Future<Output = Result<Vec<KnownNetwork>, CoreError>> + Send;

    fn list_scanned_networks(
        &self,
    ) -> impl Future<Output = Result<Vec<ScannedNetwork>, CoreError>> + Send;

    fn list_vpn_connections(
        &self,
    ) -> impl Future<Output = Result<Vec<VpnConnection>, CoreError>> + Send;

    fn execute(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<CommandResult, CoreError>> + Send;
}

/// Query one entity list and wrap it as an update.
pub async fn query<B: NetworkBackend>(
    backend: &B,
    kind: EntityKind,
) -> Result<EntityUpdate, CoreError> {
    Ok(match kind {
        EntityKind::Devices => EntityUpdate::Devices(backend.list_devices().await?),
        EntityKind::Known => EntityUpdate::Known(backend.list_known_networks().await?),
        EntityKind::Scanned => {
            EntityUpdate::Scanned(ScanUpdate::Results(backend.list_scanned_networks().await?))
        }
        EntityKind::Vpns => EntityUpdate::Vpns(backend.list_vpn_connections().await?),
    })
}
