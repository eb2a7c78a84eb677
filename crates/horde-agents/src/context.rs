//! The read-only bundle every decision step receives.

use horde_types::{EntityId, Vec2};
use horde_world::WorldView;

use crate::beliefs::Beliefs;
use crate::config::BehaviorConfig;

/// One agent's view of the current tick.
///
/// Discovery and intention checks are pure over this bundle: they read the
/// snapshot and may issue read-only world queries (traces, vitals,
/// navigability probes) but never mutate anything.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    /// The deciding agent.
    pub agent: EntityId,
    /// This tick's snapshot.
    pub beliefs: &'a Beliefs,
    /// World queries.
    pub world: &'a dyn WorldView,
    /// Behaviour thresholds.
    pub config: &'a BehaviorConfig,
}

impl<'a> DecisionContext<'a> {
    /// Bundle the inputs of one decision.
    pub const fn new(
        agent: EntityId,
        beliefs: &'a Beliefs,
        world: &'a dyn WorldView,
        config: &'a BehaviorConfig,
    ) -> Self {
        Self {
            agent,
            beliefs,
            world,
            config,
        }
    }

    /// Snapshot time.
    pub const fn now(&self) -> f64 {
        self.beliefs.now
    }

    /// The agent's position, if it has one.
    pub fn position(&self) -> Option<Vec2> {
        self.beliefs.position()
    }
}

impl core::fmt::Debug for DecisionContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecisionContext")
            .field("agent", &self.agent)
            .field("now", &self.beliefs.now)
            .finish_non_exhaustive()
    }
}

/// Narrow a duration in seconds for steering math.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn secs_f32(secs: f64) -> f32 {
    secs as f32
}
