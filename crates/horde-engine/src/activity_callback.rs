//! Tick callback that reports what the population is doing.
//!
//! Every `report_every` ticks it logs how many agents are attacking,
//! barricading, or standing still, and at `trace` level dumps the full
//! tick summary as JSON.

use horde_core::{SimulationState, TickCallback, TickSummary};
use tracing::{info, trace, warn};

/// Per-tick activity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    /// Agents with an attack committed.
    pub attacking: usize,
    /// Agents with a drop committed.
    pub barricading: usize,
    /// Agents with no movement, attack, or drop.
    pub idle: usize,
}

impl Activity {
    /// Count activity from one tick's reports.
    pub fn from_summary(summary: &TickSummary) -> Self {
        summary
            .agents
            .values()
            .fold(Self::default(), |mut activity, report| {
                let command = report.command;
                if command.attack.is_some() {
                    activity.attacking = activity.attacking.saturating_add(1);
                }
                if command.drop_item.is_some() {
                    activity.barricading = activity.barricading.saturating_add(1);
                }
                if command == horde_types::MotorCommand::IDLE {
                    activity.idle = activity.idle.saturating_add(1);
                }
                activity
            })
    }
}

/// Logs an activity line every few ticks.
pub struct ActivityCallback {
    report_every: u64,
}

impl ActivityCallback {
    /// Report every `report_every` ticks (at least every tick).
    pub const fn new(report_every: u64) -> Self {
        Self {
            report_every: if report_every == 0 { 1 } else { report_every },
        }
    }
}

impl TickCallback for ActivityCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        if summary.tick.checked_rem(self.report_every) == Some(0) {
            let activity = Activity::from_summary(summary);
            info!(
                tick = summary.tick,
                sim_time = summary.sim_time,
                agents = state.agent_count(),
                attacking = activity.attacking,
                barricading = activity.barricading,
                idle = activity.idle,
                "Population activity"
            );
        }
        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(summary) {
                Ok(json) => trace!(tick = summary.tick, summary = %json, "Tick summary"),
                Err(e) => warn!(error = %e, "failed to serialize tick summary"),
            }
        }
    }
}
