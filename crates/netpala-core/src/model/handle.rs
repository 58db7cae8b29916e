// ── Object handles ──

use std::fmt;

/// A NetworkManager object path (device, saved profile, active connection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(String);

impl Handle {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Handle {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for Handle {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}
