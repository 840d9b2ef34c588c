//! # litterlinkd — litterlink daemon
//!
//! Composition root that wires both vendor adapters to the automation loop.
//!
//! ## Responsibilities
//! - Load configuration (TOML file + environment overrides)
//! - Initialize logging and optional telemetry export
//! - Connect the Whisker account and resolve the feeder + litter box
//! - Log in to the Roborock account and select the target vacuum
//! - Build the `AutomationLoop` and run it until an external signal arrives
//!
//! Startup failures (bad credentials, missing devices, broken config) abort
//! the process: they indicate operator-level misconfiguration and are never
//! retried. Everything after startup is absorbed by the loop itself.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod telemetry;

use litterlink_adapter_roborock::{RoborockError, RoborockSession};
use litterlink_adapter_whisker::{WhiskerError, WhiskerSession};
use litterlink_app::automation_loop::AutomationLoop;
use litterlink_domain::device::{resolve_source_devices, select_action_device};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    telemetry::init(&config.logging, &config.telemetry)?;

    // Source account: enumerate once, then the session narrows to the one
    // tracked litter box.
    let session = WhiskerSession::connect(&config.whisker)
        .await
        .map_err(WhiskerError::into_domain)?;
    let robots = session.robots().await.map_err(WhiskerError::into_domain)?;
    let resolved = resolve_source_devices(&robots)?;
    tracing::info!(
        feeder = %resolved.feeder.name,
        litter_box = %resolved.litter_box.name,
        "resolved source devices"
    );
    let source = session.into_client(&resolved.litter_box);

    // Action account: first device of the home topology, by deployment
    // contract.
    let session = RoborockSession::login(&config.roborock)
        .await
        .map_err(RoborockError::into_domain)?;
    let devices = session
        .home_devices()
        .await
        .map_err(RoborockError::into_domain)?;
    let vacuum = select_action_device(&devices)?;
    tracing::info!(vacuum = %vacuum.name, device = %vacuum.id, "selected action device");
    let action = session.into_client(&vacuum);

    let automation = AutomationLoop::new(source, action, config.automation.to_settings());

    tokio::select! {
        () = automation.run() => {}
        result = shutdown_signal() => {
            result?;
            tracing::info!("shutdown signal received, exiting");
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
