//! The entity snapshot: the four lists plus the optimistic pending overlay.

use indexmap::IndexMap;

use netpala_core::{
    Device, EntityUpdate, KnownNetwork, ScanUpdate, ScannedNetwork, VpnConnection, reconcile,
};

use super::navigation::{BoxId, BoxLengths};

/// A network whose profile was just submitted but has not shown up in a
/// real KnownNetworks refresh yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNetwork {
    pub ssid: String,
    pub security: String,
}

/// One row of the Known Networks box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownRow<'a> {
    Saved(&'a KnownNetwork),
    Pending(&'a PendingNetwork),
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    devices: Vec<Device>,
    known: Vec<KnownNetwork>,
    /// Keyed by SSID. Cleared by every real KnownNetworks refresh.
    pending: IndexMap<String, PendingNetwork>,
    /// The last scan results as reported, before filtering.
    scan_results: Vec<ScannedNetwork>,
    /// `scan_results` minus known and pending SSIDs.
    scanned: Vec<ScannedNetwork>,
    vpns: Vec<VpnConnection>,
}

impl Snapshot {
    /// Replace one list wholesale.
    pub fn apply(&mut self, update: EntityUpdate) {
        match update {
            EntityUpdate::Devices(devices) => self.devices = devices,
            EntityUpdate::Known(known) => {
                self.known = known;
                self.pending.clear();
                self.reconcile();
            }
            // A marker, not data: the current list stays until results arrive.
            EntityUpdate::Scanned(ScanUpdate::RescanRequested) => {}
            EntityUpdate::Scanned(ScanUpdate::Results(scanned)) => {
                self.scan_results = scanned;
                self.reconcile();
            }
            EntityUpdate::Vpns(vpns) => self.vpns = vpns,
        }
    }

    /// Show `ssid` as known until the next real known-network refresh.
    pub fn add_pending(&mut self, ssid: impl Into<String>, security: impl Into<String>) {
        let ssid = ssid.into();
        self.pending.insert(
            ssid.clone(),
            PendingNetwork {
                ssid,
                security: security.into(),
            },
        );
        self.reconcile();
    }

    /// Always derived from the raw results, so an SSID that leaves the known
    /// list shows up as new again without waiting for another scan.
    fn reconcile(&mut self) {
        let mut scanned = reconcile(&self.known, &self.scan_results);
        scanned.retain(|s| !self.pending.contains_key(&s.ssid));
        self.scanned = scanned;
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// The device commands are issued against.
    pub fn first_device(&self) -> Option<&Device> {
        self.devices.first()
    }

    pub fn known(&self) -> &[KnownNetwork] {
        &self.known
    }

    pub fn scanned(&self) -> &[ScannedNetwork] {
        &self.scanned
    }

    pub fn vpns(&self) -> &[VpnConnection] {
        &self.vpns
    }

    /// Saved profiles first, then pending entries not yet among them.
    pub fn known_rows(&self) -> impl Iterator<Item = KnownRow<'_>> {
        let saved = self.known.iter().map(KnownRow::Saved);
        let pending = self
            .pending
            .values()
            .filter(|p| self.known.iter().all(|k| k.ssid != p.ssid))
            .map(KnownRow::Pending);
        saved.chain(pending)
    }

    pub fn known_row(&self, index: usize) -> Option<KnownRow<'_>> {
        self.known_rows().nth(index)
    }
}

impl BoxLengths for Snapshot {
    fn box_len(&self, id: BoxId) -> usize {
        match id {
            BoxId::Device | BoxId::Station => self.devices.len(),
            BoxId::Vpn => self.vpns.len(),
            BoxId::Known => self.known_rows().count(),
            BoxId::Scanned => self.scanned.len(),
        }
    }
}
