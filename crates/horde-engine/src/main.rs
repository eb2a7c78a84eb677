//! Demo engine for the Horde behavior engine.
//!
//! Wires a generated grid world to the decision loop: every tick each
//! survivor and zombie decides, the committed commands are applied to the
//! world, and time advances.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HORDE_CONFIG` or `horde-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the scenario (blocks, survivors, zombies, resource piles)
//! 4. Run the simulation loop
//! 5. Log the result and the surviving population

mod activity_callback;
mod error;
mod spawner;

use std::path::PathBuf;

use horde_core::config::{LoggingConfig, SimulationConfig};
use horde_core::{GridDriver, SimulationState, runner};
use horde_types::EntityClass;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::activity_callback::ActivityCallback;
use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "horde-config.yaml";

/// Ticks between activity reports.
const REPORT_EVERY_TICKS: u64 = 50;

/// Application entry point for the demo engine.
///
/// # Errors
///
/// Returns an error if configuration, spawning, or the simulation fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so remember how it went.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(source = %config_source, "horde-engine starting");
    info!(
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        dt_secs = config.world.dt_secs,
        max_ticks = config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Spawn the scenario.
    let scenario = spawner::spawn_scenario(&config.world, &config.scenario)?;
    info!(
        blocks = scenario.blocks.len(),
        survivors = scenario.survivors.len(),
        zombies = scenario.zombies.len(),
        piles = scenario.piles.len(),
        "Scenario spawned"
    );
    let mut driver = GridDriver::new(scenario.world, config.world.integration);
    let mut state = SimulationState::new();
    let mut callback = ActivityCallback::new(REPORT_EVERY_TICKS);

    // 4. Run the simulation.
    let result = runner::run_simulation(&mut state, &mut driver, &config, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 5. Log results.
    runner::log_simulation_end(&result);
    let world = driver.world();
    info!(
        survivors = world.living(EntityClass::Survivor).len(),
        zombies = world.living(EntityClass::Zombie).len(),
        routes_opened = world.route_ledger().opened(),
        routes_live = world.route_ledger().live(),
        "horde-engine shutdown complete"
    );

    Ok(())
}

/// Where the configuration came from.
enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// This file was missing; defaults were used.
    Defaults(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults(path) => write!(f, "defaults ({} not found)", path.display()),
        }
    }
}

/// Load configuration from `HORDE_CONFIG`, or `horde-config.yaml` in the
/// working directory. A missing file falls back to defaults.
fn load_config() -> Result<(SimulationConfig, ConfigSource), EngineError> {
    let path = std::env::var_os("HORDE_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, ConfigSource::File(path)))
    } else {
        Ok((SimulationConfig::default(), ConfigSource::Defaults(path)))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    if EnvFilter::try_new(&logging.level).is_err() {
        warn!(level = %logging.level, "Unrecognized log level in config, using info");
    }
}
