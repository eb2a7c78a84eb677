//! Arbitration, intention lifecycle, and the tick cycle for the Horde
//! behavior engine.
//!
//! Every tick each agent runs the same pipeline: beliefs, desire
//! discovery, pairwise arbitration, intention lifecycle, and action
//! aggregation into exactly one motor command. The pieces an agent
//! reasons with live in `horde-agents`; this crate strings them together
//! and drives them over time.
//!
//! # Modules
//!
//! - [`aggregate`] -- Folding intention actions into one [`MotorCommand`].
//! - [`arbitration`] -- Pairwise conflict reduction ([`resolve`]).
//! - [`brain`] -- [`AgentBrain`]: one agent's intentions, orders, and
//!   committed command.
//! - [`config`] -- Configuration loading from `horde-config.yaml` into
//!   strongly-typed structs.
//! - [`driver`] -- [`WorldDriver`] trait and the [`GridDriver`] for the
//!   in-memory world.
//! - [`lifecycle`] -- [`IntentionSet`]: keep, abandon, or instantiate.
//! - [`runner`] -- The async simulation loop.
//! - [`tick`] -- One decision tick across every agent.
//!
//! [`MotorCommand`]: horde_types::MotorCommand

pub mod aggregate;
pub mod arbitration;
pub mod brain;
pub mod config;
pub mod driver;
pub mod lifecycle;
pub mod runner;
pub mod tick;

pub use aggregate::{ActionAggregator, aggregate};
pub use arbitration::resolve;
pub use brain::{AgentBrain, DecisionReport};
pub use config::{ConfigError, SimulationConfig};
pub use driver::{GridDriver, StepReport, WorldDriver};
pub use lifecycle::{AbandonReason, IntentionSet, LifecycleReport};
pub use runner::{
    NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, TickCallback,
    log_simulation_end, run_simulation,
};
pub use tick::{SimulationState, TickSummary, run_tick};
