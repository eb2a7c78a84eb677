//! Simulation loop runner.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that alternates decision ticks with world steps:
//!
//! - **Agent sync**: brains are added and removed to match the driver's
//!   living agents before every tick
//! - **Decision**: [`run_tick`] commits one motor command per agent
//! - **Integration**: the [`WorldDriver`] applies the commands and advances
//!   time
//! - **Bounded run**: stop after `max_ticks`, or once no agent is left
//!
//! [`run_tick`]: crate::tick::run_tick

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::driver::WorldDriver;
use crate::tick::{self, SimulationState, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Applying commands to the world failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: horde_world::WorldError,
    },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// The driver reported no agents.
    NoAgents,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to report population counts, dump tick
/// summaries, etc. The callback receives the tick summary and the current
/// simulation state.
pub trait TickCallback: Send {
    /// Called after a tick's commands have been applied.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `state` - Brains and tick counter
/// * `driver` - The world being decided over and stepped
/// * `config` - Timing, tick limit, and behaviour thresholds
/// * `callback` - Called after each tick
///
/// # Errors
///
/// Returns [`RunnerError`] if the driver fails to apply commands.
pub async fn run_simulation(
    state: &mut SimulationState,
    driver: &mut dyn WorldDriver,
    config: &SimulationConfig,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let max_ticks = config.world.max_ticks;

    info!(
        max_ticks,
        tick_interval_ms = config.world.tick_interval_ms,
        dt_secs = config.world.dt_secs,
        "Simulation starting"
    );

    loop {
        // --- Sync brains with the living population ---
        state.sync_agents(&driver.agents());
        if state.agent_count() == 0 {
            info!(tick = state.tick(), "No agents left");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::NoAgents,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Decide ---
        let now = driver.time();
        let summary = tick::run_tick(state, driver.view(), &config.behavior, now);

        // --- Integrate ---
        let step = driver.step(&state.commands(), config.world.dt_secs)?;
        debug!(
            tick = summary.tick,
            moved = step.moved,
            hits = step.hits,
            turned = step.turned,
            barricaded = step.barricaded,
            "Commands applied"
        );

        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);

        // --- Check tick limit (after tick) ---
        if max_ticks > 0 && summary.tick >= max_ticks {
            info!(tick = summary.tick, max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        let interval_ms = config.world.tick_interval_ms;
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            sim_time = summary.sim_time,
            agents = summary.agents_evaluated(),
            skipped = summary.skipped.len(),
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use horde_types::{Bounds, EntityClass, Vec2};
    use horde_world::{GridWorld, IntegrationSettings};

    use super::*;
    use crate::driver::GridDriver;

    fn config(max_ticks: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.max_ticks = max_ticks;
        config.world.tick_interval_ms = 0;
        config
    }

    fn populated_driver() -> GridDriver {
        let mut world = GridWorld::new();
        world
            .add_block(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0)))
            .unwrap();
        world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        world
            .spawn_human(EntityClass::Survivor, Vec2::new(25.0, 25.0), 100.0)
            .unwrap();
        GridDriver::new(world, IntegrationSettings::default())
    }

    struct Counter {
        ticks: Vec<u64>,
    }

    impl TickCallback for Counter {
        fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
            assert_eq!(summary.tick, state.tick());
            self.ticks.push(summary.tick);
        }
    }

    #[tokio::test]
    async fn stops_at_tick_limit() {
        let mut state = SimulationState::new();
        let mut driver = populated_driver();
        let mut callback = Counter { ticks: Vec::new() };

        let result = run_simulation(&mut state, &mut driver, &config(5), &mut callback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_summary.unwrap().tick, 5);
        assert_eq!(callback.ticks, vec![1, 2, 3, 4, 5]);
        // Time advanced by dt per tick.
        assert!((driver.time() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_world_ends_immediately() {
        let mut state = SimulationState::new();
        let mut driver = GridDriver::new(GridWorld::new(), IntegrationSettings::default());
        let result = run_simulation(&mut state, &mut driver, &config(10), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::NoAgents);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        log_simulation_end(&result);
    }

    #[tokio::test]
    async fn agents_move_during_run() {
        let mut state = SimulationState::new();
        let mut driver = populated_driver();
        let before: Vec<Vec2> = driver
            .agents()
            .iter()
            .map(|id| driver.world().position_of(*id).unwrap())
            .collect();
        run_simulation(&mut state, &mut driver, &config(10), &mut NoOpCallback)
            .await
            .unwrap();
        let after: Vec<Vec2> = driver
            .agents()
            .iter()
            .map(|id| driver.world().position_of(*id).unwrap())
            .collect();
        assert_ne!(before, after);
    }
}
