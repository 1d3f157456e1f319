//! Bridge binary for the simbridge telemetry bridge.
//!
//! Wires the simulator link, the state mirror, and the HTTP API into
//! one process.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `simbridge.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulated link and the state mirror
//! 4. Register the telemetry property channels
//! 5. Attempt the simulator handshake (failure is not fatal)
//! 6. Start the notification pump feeding the mirror
//! 7. Serve the bridge API until the process is terminated

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use simbridge_core::config::BridgeConfig;
use simbridge_core::link::{PropertySink, SimulatorLink};
use simbridge_core::sim::SimulatedLink;
use simbridge_core::store::StateStore;
use simbridge_server::server::{ServerConfig, start_server};
use simbridge_server::state::AppState;
use simbridge_types::TelemetryField;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::BridgeError;

/// Configuration file looked up relative to the working directory.
const CONFIG_PATH: &str = "simbridge.yaml";

#[tokio::main]
async fn main() -> Result<(), BridgeError> {
    // 1. Load configuration first so logging can honor its level.
    let (config, used_defaults) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("simbridge starting");
    if used_defaults {
        info!(path = CONFIG_PATH, "no config file found, using defaults");
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        update_interval_ms = config.simulator.update_interval_ms,
        auto_connect = config.simulator.auto_connect,
        "configuration loaded"
    );

    // 3. Build the simulated link and the state mirror.
    let link = Arc::new(SimulatedLink::new(Duration::from_millis(
        config.simulator.update_interval_ms,
    )));
    let store = Arc::new(StateStore::new(
        Arc::clone(&link) as Arc<dyn SimulatorLink>
    ));

    // 4. Register the telemetry property channels.
    for field in TelemetryField::ALL {
        link.register_property(field);
    }
    info!(channels = TelemetryField::ALL.len(), "telemetry channels registered");

    // 5. Handshake. A refusal is logged, not fatal: the bridge serves
    // last-known (zeroed) state and a collaborator triggers reconnects.
    if config.simulator.auto_connect {
        if link.connect() {
            info!("simulator link connected");
        } else {
            warn!("simulator handshake failed, serving last-known state");
        }
    }

    // 6. Start the notification pump with the mirror as its sink.
    link.start_pump(Arc::clone(&store) as Arc<dyn PropertySink>);

    // 7. Serve the bridge API.
    let state = Arc::new(AppState::new(store));
    let server_config = ServerConfig::from(&config.server);
    start_server(&server_config, state).await?;

    Ok(())
}

/// Load `simbridge.yaml`, falling back to defaults when absent.
///
/// Returns whether defaults were used. The fallback goes through
/// [`BridgeConfig::parse`] so environment overrides still apply.
fn load_config() -> Result<(BridgeConfig, bool), BridgeError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((BridgeConfig::from_file(path)?, false))
    } else {
        Ok((BridgeConfig::parse("{}")?, true))
    }
}
