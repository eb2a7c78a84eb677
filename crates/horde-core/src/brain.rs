//! One agent's decision state and its per-tick pipeline.
//!
//! [`AgentBrain::think`] runs the whole pipeline for one agent:
//!
//! 1. build beliefs (keeping blocks referenced by live intentions in view);
//! 2. discover fresh desires;
//! 3. arbitrate fresh desires, newly issued player orders, and the desires
//!    carried by live intentions still willing to continue;
//! 4. reconcile live intentions with the resolved set;
//! 5. drain actions and commit the aggregated [`MotorCommand`].
//!
//! An agent the world cannot place skips steps 2 to 4: its intentions are
//! released and it idles.
//!
//! The brain is the only writer of its agent's motor command.

use horde_agents::desires::PlayerMovement;
use horde_agents::{BehaviorConfig, DecisionContext, Desire, build_beliefs, discover_all};
use horde_types::{DesireKind, EntityId, MotorCommand, Vec2};
use horde_world::WorldView;
use serde::Serialize;

use crate::aggregate::drain_intentions;
use crate::arbitration::resolve;
use crate::lifecycle::{AbandonReason, IntentionSet, LifecycleReport};

/// What one call to [`AgentBrain::think`] decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    /// The deciding agent.
    pub agent: EntityId,
    /// Whether the agent could be located this tick.
    pub located: bool,
    /// Number of freshly discovered desires.
    pub discovered: usize,
    /// Kinds in the resolved desire set, in resolved order.
    pub resolved: Vec<DesireKind>,
    /// Lifecycle outcome.
    pub lifecycle: LifecycleReport,
    /// The committed command.
    pub command: MotorCommand,
}

/// Decision state of one agent.
#[derive(Debug)]
pub struct AgentBrain {
    agent: EntityId,
    intentions: IntentionSet,
    pending_orders: Vec<PlayerMovement>,
    orders_issued: u64,
    motor: MotorCommand,
}

impl AgentBrain {
    /// A brain with no intentions and an idle command.
    pub const fn new(agent: EntityId) -> Self {
        Self {
            agent,
            intentions: IntentionSet::new(),
            pending_orders: Vec::new(),
            orders_issued: 0,
            motor: MotorCommand::IDLE,
        }
    }

    /// The agent this brain decides for.
    pub const fn agent(&self) -> EntityId {
        self.agent
    }

    /// The command committed by the last [`think`](Self::think).
    pub const fn motor(&self) -> MotorCommand {
        self.motor
    }

    /// Live intentions.
    pub const fn intentions(&self) -> &IntentionSet {
        &self.intentions
    }

    /// Queue a player order to move to `destination`.
    ///
    /// The order enters arbitration on the next tick and from then on is
    /// carried by its intention until it finishes or a newer order
    /// replaces it. Returns the order number.
    pub fn command_move(&mut self, destination: Vec2, now: f64, config: &BehaviorConfig) -> u64 {
        self.orders_issued = self.orders_issued.saturating_add(1);
        let order = self.orders_issued;
        tracing::debug!(agent = %self.agent, order, x = destination.x, y = destination.y, "Player order queued");
        self.pending_orders.push(PlayerMovement {
            order,
            destination,
            issued_at: now,
            base_utility: config.player_base_utility,
            growth: config.player_utility_growth,
        });
        order
    }

    /// Run one decision tick and commit the resulting command.
    pub fn think(
        &mut self,
        world: &dyn WorldView,
        config: &BehaviorConfig,
        now: f64,
    ) -> DecisionReport {
        let extra_blocks = self.intentions.referenced_blocks();
        let beliefs = build_beliefs(self.agent, world, config, now, &extra_blocks);
        if beliefs.me.is_none() {
            return self.idle_unlocated(now);
        }
        let ctx = DecisionContext::new(self.agent, &beliefs, world, config);

        let fresh = discover_all(&ctx);
        let discovered = fresh.len();

        let mut candidates = fresh;
        candidates.extend(self.pending_orders.drain(..).map(Desire::PlayerMovement));
        candidates.extend(self.intentions.carried_desires(&ctx));

        let resolved = resolve(candidates);
        let resolved_kinds: Vec<DesireKind> = resolved.iter().map(Desire::kind).collect();

        let lifecycle = self.intentions.update(resolved, &ctx);
        self.motor = drain_intentions(&mut self.intentions, &ctx);

        tracing::debug!(
            agent = %self.agent,
            discovered,
            resolved = resolved_kinds.len(),
            created = lifecycle.created.len(),
            kept = lifecycle.kept.len(),
            abandoned = lifecycle.abandoned.len(),
            "Agent decided"
        );

        DecisionReport {
            agent: self.agent,
            located: true,
            discovered,
            resolved: resolved_kinds,
            lifecycle,
            command: self.motor,
        }
    }

    /// Drop every live intention of an agent the world cannot place.
    ///
    /// Nothing is arbitrated or created. Queued orders stay queued until the
    /// agent can be located again.
    fn idle_unlocated(&mut self, now: f64) -> DecisionReport {
        let lifecycle = LifecycleReport {
            abandoned: self
                .intentions
                .kinds()
                .into_iter()
                .map(|kind| (kind, AbandonReason::Displaced))
                .collect(),
            ..LifecycleReport::default()
        };
        self.intentions.release_all();
        self.motor = MotorCommand::IDLE;
        tracing::debug!(
            agent = %self.agent,
            sim_time = now,
            dropped = lifecycle.abandoned.len(),
            "Agent unlocated, idling"
        );

        DecisionReport {
            agent: self.agent,
            located: false,
            discovered: 0,
            resolved: Vec::new(),
            lifecycle,
            command: self.motor,
        }
    }

    /// Release every intention and go idle.
    pub fn release(&mut self) {
        self.intentions.release_all();
        self.pending_orders.clear();
        self.motor = MotorCommand::IDLE;
    }
}

impl Drop for AgentBrain {
    fn drop(&mut self) {
        self.intentions.release_all();
    }
}
