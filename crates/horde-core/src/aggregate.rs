//! Action aggregation: many per-intention actions into one motor command.
//!
//! Movement is summed exactly and never renormalized; the magnitude of
//! each contribution is its urgency. Discrete actions are resolved
//! deterministically: the highest-priority drop wins with ties keeping
//! the first encountered, and the first attack encountered wins.

use horde_agents::DecisionContext;
use horde_types::{Action, EntityId, MotorCommand, Vec2};

use crate::lifecycle::IntentionSet;

/// Accumulates actions for one agent during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionAggregator {
    movement: Vec2,
    attack: Option<EntityId>,
    drop_item: Option<f32>,
    actions: u32,
}

impl ActionAggregator {
    /// An empty aggregator.
    pub const fn new() -> Self {
        Self {
            movement: Vec2::ZERO,
            attack: None,
            drop_item: None,
            actions: 0,
        }
    }

    /// Fold one action in.
    pub fn push(&mut self, action: Action) {
        self.actions = self.actions.saturating_add(1);
        match action {
            Action::Movement { vector } => self.movement += vector,
            Action::Attack { target } => {
                if self.attack.is_none() {
                    self.attack = Some(target);
                }
            }
            Action::DropItem { priority } => {
                if self.drop_item.is_none_or(|best| priority > best) {
                    self.drop_item = Some(priority);
                }
            }
        }
    }

    /// Number of actions folded in.
    pub const fn action_count(&self) -> u32 {
        self.actions
    }

    /// The consolidated command.
    pub const fn finish(&self) -> MotorCommand {
        MotorCommand {
            movement: self.movement,
            attack: self.attack,
            drop_item: self.drop_item,
        }
    }
}

impl Extend<Action> for ActionAggregator {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.push(action);
        }
    }
}

/// Fold a sequence of actions into one command.
pub fn aggregate<I: IntoIterator<Item = Action>>(actions: I) -> MotorCommand {
    let mut aggregator = ActionAggregator::new();
    aggregator.extend(actions);
    aggregator.finish()
}

/// Drain every live intention, in kind order, into one command.
pub fn drain_intentions(intentions: &mut IntentionSet, ctx: &DecisionContext<'_>) -> MotorCommand {
    let mut aggregator = ActionAggregator::new();
    for intention in intentions.iter_mut() {
        aggregator.extend(intention.actions(ctx));
    }
    tracing::trace!(agent = %ctx.agent, actions = aggregator.action_count(), "Actions aggregated");
    aggregator.finish()
}
