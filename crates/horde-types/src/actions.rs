//! Per-tick action outputs and the consolidated motor/combat command.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::vector::Vec2;

/// One output of an intention for the current tick.
///
/// Actions are produced and consumed within a single tick and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Continuous steering contribution; direction is heading, magnitude is
    /// urgency.
    Movement {
        /// The steering vector.
        vector: Vec2,
    },
    /// Strike an entity.
    Attack {
        /// The entity to strike.
        target: EntityId,
    },
    /// Put down the carried item.
    DropItem {
        /// Weight used to pick one drop among competing requests.
        priority: f32,
    },
}

impl Action {
    /// Shorthand for a movement action.
    pub const fn movement(vector: Vec2) -> Self {
        Self::Movement { vector }
    }
}

/// The single consolidated command committed to an agent each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorCommand {
    /// Net heading/speed request: the exact sum of every movement action.
    pub movement: Vec2,
    /// At most one attack target.
    pub attack: Option<EntityId>,
    /// At most one drop request, carrying the winning priority.
    pub drop_item: Option<f32>,
}

impl MotorCommand {
    /// A command that does nothing.
    pub const IDLE: Self = Self {
        movement: Vec2::ZERO,
        attack: None,
        drop_item: None,
    };
}
