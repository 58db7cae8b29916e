// ── Core error types ──
//
// Everything the dashboard can report. Transport failures arrive through
// `From<netpala_nm::Error>`; validation and precondition errors are raised
// before any bus call is made.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport errors ─────────────────────────────────────────────
    #[error("D-Bus error: {message}")]
    Bus { message: String },

    #[error("NetworkManager is unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("failed to {action}: {reason}")]
    CommandFailed { action: String, reason: String },

    // ── Validation errors ────────────────────────────────────────────
    #[error("{message}")]
    ValidationFailed { message: String },

    // ── Precondition errors ──────────────────────────────────────────
    #[error("no wifi device found")]
    NoWifiDevice,

    #[error("no wifi device found to connect with")]
    NoWifiDeviceToConnect,

    #[error("cannot deactivate VPN '{connection}': no active connection path found")]
    NoActiveInstance { connection: String },

    // ── Partial success ──────────────────────────────────────────────
    /// The profile was created but its path could not be read back, so it
    /// was not activated.
    #[error("added connection but failed to read path: {reason}")]
    ProfileHandleUnavailable { reason: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Wrap a failed bus call with the action that was attempted.
    pub(crate) fn command(action: impl Into<String>, err: netpala_nm::Error) -> Self {
        match Self::from(err) {
            Self::Bus { message } => Self::CommandFailed {
                action: action.into(),
                reason: message,
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netpala_nm::Error> for CoreError {
    fn from(err: netpala_nm::Error) -> Self {
        if err.is_disconnected() {
            return CoreError::ServiceUnavailable {
                reason: err.to_string(),
            };
        }
        match err {
            netpala_nm::Error::Bus(e) => CoreError::Bus {
                message: e.to_string(),
            },
            netpala_nm::Error::Fdo(e) => CoreError::Bus {
                message: e.to_string(),
            },
            netpala_nm::Error::Variant(e) => {
                CoreError::Internal(format!("invalid D-Bus value: {e}"))
            }
            netpala_nm::Error::UnreadableReply { reason, .. } => {
                CoreError::ProfileHandleUnavailable { reason }
            }
            e @ netpala_nm::Error::MissingProperty { .. } => CoreError::Internal(e.to_string()),
        }
    }
}
