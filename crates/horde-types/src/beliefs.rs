//! Belief records: what one agent knows about the world this tick.
//!
//! Records are produced fresh every tick from world queries and never
//! mutated afterwards. A newer record supersedes an older one; nothing is
//! updated in place.

use serde::{Deserialize, Serialize};

use crate::enums::EntityClass;
use crate::ids::{BlockId, EntityId};
use crate::vector::{Bounds, Vec2};

/// The agent's view of itself at the time of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfBeliefs {
    /// The owning agent.
    pub id: EntityId,
    /// Survivor or zombie.
    pub class: EntityClass,
    /// Current position.
    pub position: Vec2,
    /// The block the agent stands in, if any.
    pub block: Option<BlockId>,
    /// Current numeric health.
    pub health: f32,
}

/// Last-known state of one perceived entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityBeliefs {
    /// The perceived entity.
    pub id: EntityId,
    /// Coarse classification.
    pub class: EntityClass,
    /// Where the entity was last observed.
    pub position: Vec2,
    /// Simulation time (seconds) of the last observation.
    pub seen_at: f64,
    /// Block containing the last observed position.
    pub block: Option<BlockId>,
    /// Barricade units this entity contributes (zero for humans).
    pub resource_units: u32,
}

impl EntityBeliefs {
    /// Seconds elapsed since the observation, never negative.
    pub fn age(&self, now: f64) -> f64 {
        (now - self.seen_at).max(0.0)
    }
}

/// Aggregate desirability of one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockBeliefs {
    /// The block.
    pub id: BlockId,
    /// Scalar desirability; higher is better.
    pub utility: f32,
    /// Barricade potential: loose pile units plus breakable-source minimums.
    pub resource_count: u32,
    /// Whether the block is fully barricaded.
    pub enclosed: bool,
    /// Centre of the block.
    pub center: Vec2,
    /// Block extent.
    pub bounds: Bounds,
}
