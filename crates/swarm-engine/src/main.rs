//! Engine binary for the swarm colony core.
//!
//! Wires configuration, logging, the starting room, and the tick loop
//! together, then writes the colony's memory to disk on the way out.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `swarm-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Create the starting room
//! 4. Run the tick loop until the tick limit or Ctrl-C
//! 5. Write the memory snapshot

mod error;
mod runner;

use std::path::Path;

use anyhow::Context as _;
use swarm_core::config::LoggingConfig;
use swarm_core::{Colony, SwarmConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

const CONFIG_PATH: &str = "swarm-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        tick_interval_ms = config.engine.tick_interval_ms,
        max_ticks = config.engine.max_ticks,
        harvesters_per_source = config.planner.harvesters_per_source,
        "swarm-engine starting"
    );

    // 3. Create the starting room.
    let (mut room, ids) = swarm_world::create_starting_room()
        .map_err(EngineError::from)
        .context("building starting room")?;
    info!(
        spawn = %ids.spawn,
        controller = %ids.controller,
        construction_sites = ids.construction_sites.len(),
        "Starting room created"
    );

    // 4. Run the tick loop.
    let mut colony = Colony::new(room.id(), &config);
    let result = runner::run_colony(&mut colony, &mut room, &config.engine).await?;
    runner::log_run_end(&result);

    // 5. Write the memory snapshot.
    let path = &config.engine.memory_snapshot_path;
    colony
        .store
        .save(path)
        .map_err(EngineError::from)
        .with_context(|| format!("writing memory snapshot to {}", path.display()))?;
    info!(path = %path.display(), agents = colony.store.len(), "Memory snapshot written");

    Ok(())
}

/// Load `swarm-config.yaml` from the working directory.
fn load_config() -> Result<SwarmConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(SwarmConfig::from_file(path)?)
    } else {
        Ok(SwarmConfig::default())
    }
}

/// `RUST_LOG` wins; otherwise the configured level is the filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
