//! The decision tick across every agent.
//!
//! [`run_tick`] evaluates each agent's brain against a shared read-only
//! world view. Agents are evaluated one after another in [`EntityId`]
//! order; each writes only its own motor command, so the order never
//! changes the outcome. Applying the committed commands to the world is
//! the caller's job (see [`crate::runner`]).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use horde_agents::BehaviorConfig;
use horde_types::{EntityId, MotorCommand};
use horde_world::WorldView;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::brain::{AgentBrain, DecisionReport};

/// Summary of one decision tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed, starting at 1.
    pub tick: u64,
    /// Wall-clock time the tick started.
    pub started_at: DateTime<Utc>,
    /// Simulation time the tick decided at.
    pub sim_time: f64,
    /// Per-agent decision reports.
    pub agents: BTreeMap<EntityId, DecisionReport>,
    /// Agents that could not be located and went idle.
    pub skipped: Vec<EntityId>,
}

impl TickSummary {
    /// Number of agents that decided this tick, located or not.
    pub fn agents_evaluated(&self) -> usize {
        self.agents.len()
    }

    /// Total intentions created across all agents.
    pub fn intentions_created(&self) -> usize {
        self.agents.values().map(|r| r.lifecycle.created.len()).sum()
    }

    /// Total intentions dropped across all agents.
    pub fn intentions_dropped(&self) -> usize {
        self.agents.values().map(|r| r.lifecycle.abandoned.len()).sum()
    }
}

/// The brains being driven and the tick counter.
#[derive(Debug, Default)]
pub struct SimulationState {
    tick: u64,
    brains: BTreeMap<EntityId, AgentBrain>,
}

impl SimulationState {
    /// An empty state at tick zero.
    pub const fn new() -> Self {
        Self {
            tick: 0,
            brains: BTreeMap::new(),
        }
    }

    /// The last tick executed.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of agents with a brain.
    pub fn agent_count(&self) -> usize {
        self.brains.len()
    }

    /// Whether `agent` has a brain.
    pub fn contains(&self, agent: EntityId) -> bool {
        self.brains.contains_key(&agent)
    }

    /// Give `agent` a brain. Returns `false` if it already had one.
    pub fn add_agent(&mut self, agent: EntityId) -> bool {
        if self.brains.contains_key(&agent) {
            return false;
        }
        self.brains.insert(agent, AgentBrain::new(agent));
        true
    }

    /// Remove `agent`'s brain, releasing everything it held.
    pub fn remove_agent(&mut self, agent: EntityId) -> bool {
        self.brains.remove(&agent).is_some_and(|mut brain| {
            brain.release();
            true
        })
    }

    /// Make the set of brains match `living`: new agents get a brain and
    /// agents no longer listed lose theirs.
    pub fn sync_agents(&mut self, living: &[EntityId]) {
        let gone: Vec<EntityId> = self
            .brains
            .keys()
            .filter(|id| !living.contains(id))
            .copied()
            .collect();
        for agent in gone {
            debug!(agent = %agent, "Agent left the simulation");
            self.remove_agent(agent);
        }
        for agent in living {
            if self.add_agent(*agent) {
                debug!(agent = %agent, "Agent joined the simulation");
            }
        }
    }

    /// The brain of `agent`.
    pub fn brain(&self, agent: EntityId) -> Option<&AgentBrain> {
        self.brains.get(&agent)
    }

    /// Mutable access to the brain of `agent`, e.g. to issue orders.
    pub fn brain_mut(&mut self, agent: EntityId) -> Option<&mut AgentBrain> {
        self.brains.get_mut(&agent)
    }

    /// The committed command of every agent, in ID order.
    pub fn commands(&self) -> BTreeMap<EntityId, MotorCommand> {
        self.brains
            .iter()
            .map(|(id, brain)| (*id, brain.motor()))
            .collect()
    }
}

/// Run one decision tick for every agent in `state`.
pub fn run_tick(
    state: &mut SimulationState,
    world: &dyn WorldView,
    config: &BehaviorConfig,
    now: f64,
) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;
    let started_at = Utc::now();
    debug!(tick, sim_time = now, agents = state.brains.len(), "Tick started");

    let mut agents = BTreeMap::new();
    let mut skipped = Vec::new();
    for (id, brain) in &mut state.brains {
        let report = brain.think(world, config, now);
        if !report.located {
            warn!(tick, agent = %id, "Agent could not be located, idling");
            skipped.push(*id);
        }
        agents.insert(*id, report);
    }

    let summary = TickSummary {
        tick,
        started_at,
        sim_time: now,
        agents,
        skipped,
    };
    info!(
        tick,
        agents = summary.agents_evaluated(),
        created = summary.intentions_created(),
        dropped = summary.intentions_dropped(),
        skipped = summary.skipped.len(),
        "Tick complete"
    );
    summary
}
