use thiserror::Error;

/// Top-level error type for the `netpala-nm` crate.
///
/// Covers the bus transport, method replies and property decoding.
/// `netpala-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The bus connection or a method call failed.
    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// A standard interface (Properties, Introspectable) returned an error.
    #[error("D-Bus error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    /// An object path or variant could not be built.
    #[error("Invalid D-Bus value: {0}")]
    Variant(#[from] zbus::zvariant::Error),

    // ── Replies ─────────────────────────────────────────────────────
    /// The method succeeded but its reply body could not be decoded.
    #[error("{method} succeeded but its reply could not be read: {reason}")]
    UnreadableReply { method: &'static str, reason: String },

    // ── Properties ──────────────────────────────────────────────────
    /// A property NetworkManager always publishes was absent.
    #[error("{interface} on {path} has no {property} property")]
    MissingProperty {
        path: String,
        interface: &'static str,
        property: &'static str,
    },
}

impl Error {
    /// Whether the bus itself is gone (as opposed to a single call failing).
    pub fn is_disconnected(&self) -> bool {
        matches!(
            self,
            Self::Bus(zbus::Error::InputOutput(_) | zbus::Error::Handshake(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
