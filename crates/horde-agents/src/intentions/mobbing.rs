//! Swarming a hostile.

use horde_types::{Action, EntityId};

use crate::context::DecisionContext;
use crate::desires::Mobbing;

/// Closes on a target and strikes it once in reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobIntention {
    desire: Mobbing,
}

impl MobIntention {
    /// Bind to a target.
    pub const fn new(desire: Mobbing) -> Self {
        Self { desire }
    }

    /// The bound desire.
    pub const fn desire(&self) -> Mobbing {
        self.desire
    }

    /// The entity being swarmed.
    pub const fn target(&self) -> EntityId {
        self.desire.target
    }

    /// Accept this tick's surviving desire for the same target.
    pub fn rebind(&mut self, desire: Mobbing) {
        if desire.target == self.desire.target {
            self.desire = desire;
        }
    }

    /// Give up once the target is dead or has no health at all.
    pub fn should_abandon(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.world
            .vitals(self.desire.target)
            .is_none_or(|v| !v.alive)
    }

    /// Continue only while the target is still perceived.
    pub fn should_keep(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.beliefs.entity(self.desire.target).is_some()
    }

    /// Strike when in reach, otherwise close in on the last sighting.
    pub fn actions(&self, ctx: &DecisionContext<'_>) -> Vec<Action> {
        let Some(from) = ctx.position() else {
            return Vec::new();
        };
        let target = ctx
            .beliefs
            .entity(self.desire.target)
            .map_or(self.desire.last_position, |e| e.position);
        let reach = ctx.config.attack_range;
        if target.distance_squared(from) <= reach * reach {
            return vec![Action::Attack {
                target: self.desire.target,
            }];
        }
        let heading = (target - from).normalize_or_zero();
        if heading.is_zero() {
            return Vec::new();
        }
        vec![Action::movement(heading * ctx.config.mob_strength)]
    }
}
