//! Configuration for the netpala dashboard.
//!
//! Defaults, then `<config dir>/config.toml`, then `NETPALA_*` environment
//! variables. Every field is optional in the file; CLI flags are applied
//! on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Timing knobs and the log destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Full resync of every list, independent of signals.
    pub refresh_interval_secs: u64,

    /// Quiet period after the last access-point signal before re-querying
    /// scan results.
    pub debounce_ms: u64,

    /// Delay before re-reading saved profiles after adding one.
    pub known_refresh_delay_ms: u64,

    /// Delay before re-reading devices after a manual rescan, so the
    /// scanning flag has time to flip.
    pub rescan_status_delay_ms: u64,

    /// Log file; defaults to `<cache dir>/netpala.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 15,
            debounce_ms: 500,
            known_refresh_delay_ms: 150,
            rescan_status_delay_ms: 250,
            log_file: None,
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn known_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.known_refresh_delay_ms)
    }

    pub fn rescan_status_delay(&self) -> Duration {
        Duration::from_millis(self.rescan_status_delay_ms)
    }

    /// Configured log file, or the default under the cache directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }

    /// Reject values that would spin the refresh loops.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "refresh_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::Validation {
                field: "debounce_ms".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The config as it would be written to disk.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "netpala")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "netpala", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// `<cache dir>/netpala.log`.
pub fn default_log_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".cache", "netpala", "netpala.log"]),
        |dirs| dirs.cache_dir().join("netpala.log"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETPALA_"))
        .extract()?;
    config.validate()?;
    Ok(config)
}
