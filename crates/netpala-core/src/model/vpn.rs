// ── VPN tunnels ──

use super::handle::Handle;

/// A saved VPN or WireGuard profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnConnection {
    /// Saved-profile path.
    pub handle: Handle,
    /// Active-connection path, present only while the tunnel is up.
    pub active: Option<Handle>,
    pub name: String,
    /// `WireGuard`, `OPENVPN`, `VPN`, ...
    pub kind: String,
    pub connected: bool,
}
