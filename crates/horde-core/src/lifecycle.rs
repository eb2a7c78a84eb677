//! Intention lifecycle: keep, abandon, or instantiate.
//!
//! An agent holds at most one live intention per [`DesireKind`]. Each tick
//! [`IntentionSet::update`] walks the live intentions against the resolved
//! desire set:
//!
//! - an intention whose desire (same kind and identity) survived
//!   arbitration, that does not want to abandon, and that is willing to
//!   continue is kept as the same instance and rebound to the survivor;
//! - every other intention is released and dropped;
//! - every resolved desire whose kind has no live intention spawns one,
//!   first in resolved order winning.
//!
//! A desire whose intention gave up this tick (as opposed to being
//! displaced) is consumed with it rather than respawned immediately.

use std::collections::BTreeMap;

use horde_agents::{DecisionContext, Desire, Intention};
use horde_types::{BlockId, DesireKind};
use serde::Serialize;
use tracing::debug;

/// Why a live intention was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    /// No desire of its kind and identity survived arbitration.
    Displaced,
    /// The intention judged its pursuit impossible or finished.
    Abandoned,
    /// The intention declined to continue.
    Declined,
}

/// What one lifecycle update did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LifecycleReport {
    /// Kinds whose intention was kept.
    pub kept: Vec<DesireKind>,
    /// Kinds whose intention was newly created.
    pub created: Vec<DesireKind>,
    /// Kinds whose intention was dropped, with the reason.
    pub abandoned: Vec<(DesireKind, AbandonReason)>,
}

/// The live intentions of one agent, keyed (and drained) by kind.
#[derive(Debug, Default)]
pub struct IntentionSet {
    live: BTreeMap<DesireKind, Intention>,
}

impl IntentionSet {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            live: BTreeMap::new(),
        }
    }

    /// Number of live intentions.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no intention is live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// The live intention of a kind.
    pub fn get(&self, kind: DesireKind) -> Option<&Intention> {
        self.live.get(&kind)
    }

    /// Live kinds in drain order.
    pub fn kinds(&self) -> Vec<DesireKind> {
        self.live.keys().copied().collect()
    }

    /// Live intentions in drain order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Intention> {
        self.live.values_mut()
    }

    /// Desires carried into this tick's arbitration by live intentions.
    ///
    /// Only intentions still willing to continue carry their desire; the
    /// rest compete with nothing and are displaced in [`update`](Self::update).
    pub fn carried_desires(&self, ctx: &DecisionContext<'_>) -> Vec<Desire> {
        self.live
            .values()
            .filter(|intention| intention.should_keep(ctx))
            .filter_map(Intention::carried_desire)
            .collect()
    }

    /// Blocks the live intentions refer to.
    pub fn referenced_blocks(&self) -> Vec<BlockId> {
        self.live.values().filter_map(Intention::block).collect()
    }

    /// Reconcile live intentions with this tick's resolved desires.
    pub fn update(&mut self, resolved: Vec<Desire>, ctx: &DecisionContext<'_>) -> LifecycleReport {
        let mut report = LifecycleReport::default();
        let mut pending: Vec<Option<Desire>> = resolved.into_iter().map(Some).collect();

        let live = std::mem::take(&mut self.live);
        for (kind, mut intention) in live {
            let key = intention.key();
            let matching = pending
                .iter()
                .position(|d| d.as_ref().is_some_and(|d| d.key() == key));

            let verdict = match matching {
                None => Err(AbandonReason::Displaced),
                Some(_) if intention.should_abandon(ctx) => Err(AbandonReason::Abandoned),
                Some(_) if !intention.should_keep(ctx) => Err(AbandonReason::Declined),
                Some(index) => Ok(index),
            };

            match verdict {
                Ok(index) => {
                    if let Some(desire) = pending.get_mut(index).and_then(Option::take) {
                        intention.rebind(desire);
                    }
                    self.live.insert(kind, intention);
                    report.kept.push(kind);
                }
                Err(reason) => {
                    if let Some(slot) = matching.and_then(|index| pending.get_mut(index)) {
                        *slot = None;
                    }
                    intention.release();
                    debug!(agent = %ctx.agent, kind = %kind, reason = ?reason, "Intention dropped");
                    report.abandoned.push((kind, reason));
                }
            }
        }

        for desire in pending.into_iter().flatten() {
            let kind = desire.kind();
            if self.live.contains_key(&kind) {
                continue;
            }
            debug!(agent = %ctx.agent, kind = %kind, "Intention created");
            self.live.insert(kind, desire.into_intention(ctx));
            report.created.push(kind);
        }

        report
    }

    /// Release and drop every live intention.
    pub fn release_all(&mut self) {
        for (_, mut intention) in std::mem::take(&mut self.live) {
            intention.release();
        }
    }
}
