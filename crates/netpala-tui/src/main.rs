//! `netpala`: terminal dashboard for NetworkManager Wi-Fi and VPN
//! connections.
//!
//! Mirrors devices, saved profiles, scan results and VPN tunnels, and keeps
//! them in sync with NetworkManager's D-Bus signals, a debounced scan
//! refresh and a periodic full refresh. Logs go to a file (default
//! `<cache dir>/netpala.log`) so they never corrupt the terminal.
//!
//! Entry point: CLI parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod listener;
mod schedule;
mod screens;
mod state;
mod theme;
mod tui;
mod update;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netpala_config::Config;
use netpala_core::Controller;

use crate::app::App;

/// Terminal dashboard for NetworkManager Wi-Fi and VPN connections.
#[derive(Parser, Debug)]
#[command(name = "netpala", version, about)]
struct Cli {
    /// Log file path (defaults to the config file's `log_file`, then the cache dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seconds between full refreshes
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: Option<u64>,

    /// Milliseconds to wait for scan results to settle
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    debounce: Option<u64>,
}

/// File-based tracing. Nothing may be logged to stdout/stderr while the
/// dashboard owns the terminal. Hold the returned guard until exit so the
/// writer flushes.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netpala={log_level},netpala_core={log_level},netpala_nm={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netpala.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before the terminal is touched, so startup panics print cleanly.
    tui::install_hooks()?;

    // A broken config file is reported once logging is up.
    let loaded = netpala_config::load_config();
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(secs) = cli.refresh_interval {
        config.refresh_interval_secs = secs;
    }
    if let Some(ms) = cli.debounce {
        config.debounce_ms = ms;
    }

    let log_file = cli.log_file.clone().unwrap_or_else(|| config.log_path());
    let _log_guard = setup_tracing(&log_file, cli.verbose);
    if let Err(e) = &loaded {
        warn!(error = %e, "ignoring config file, using defaults");
    }

    info!(
        refresh_secs = config.refresh_interval_secs,
        debounce_ms = config.debounce_ms,
        "starting netpala"
    );

    let controller = Controller::connect().await?;
    let signals = controller.signals().await?;

    let mut app = App::new(controller, &config);
    app.run(signals).await?;

    Ok(())
}
