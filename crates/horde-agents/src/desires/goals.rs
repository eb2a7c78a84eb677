//! Goal desires: relocating, fortifying, and swarming.
//!
//! Unlike steering, these persist. The intention a goal spawns carries its
//! desire back into the next tick's arbitration, so a goal that is no
//! longer re-discovered keeps competing until its intention gives up.

use horde_types::{BlockId, EntityClass, EntityId, Vec2};

use crate::beliefs::count_f32;
use crate::context::DecisionContext;

use super::Desire;

/// Relocate to a more desirable block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Migration {
    /// The block to move to.
    pub destination: BlockId,
    /// Centre of the destination block.
    pub target: Vec2,
    /// Destination utility per unit of travel distance.
    pub utility: f32,
    /// Snapshot time at which the desire was discovered.
    pub created_at: f64,
}

/// Fortify the current block with loose material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barricading {
    /// The block to fortify.
    pub block: BlockId,
    /// Resource potential of the block at discovery.
    pub utility: f32,
    /// Snapshot time at which the desire was discovered.
    pub created_at: f64,
}

/// Swarm a hostile together with allies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mobbing {
    /// The hostile to swarm.
    pub target: EntityId,
    /// Where the target was last seen.
    pub last_position: Vec2,
    /// Ally-to-hostile advantage, discounted by distance.
    pub utility: f32,
}

/// Health totals around a mobbing target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MobOdds {
    /// Health of live allies (the agent included) with a clear line to the target.
    pub ally_sum: f32,
    /// Health of live hostiles near the target (the target included).
    pub hostile_sum: f32,
}

impl MobOdds {
    /// Whether the odds clear the configured ratio.
    pub fn is_safe(&self, ratio: f32) -> bool {
        self.hostile_sum <= ratio * self.ally_sum
    }
}

/// At most one item: the best other block by utility per distance, if it
/// beats the current block. Survivors only.
pub fn discover_migration(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };
    if me.class != EntityClass::Survivor {
        return Vec::new();
    }
    let current = ctx.beliefs.current_block();

    let mut best: Option<(f32, BlockId, Vec2)> = None;
    for block in ctx.beliefs.blocks.values() {
        if Some(block.id) == current.map(|c| c.id) {
            continue;
        }
        let ratio = block.utility / me.position.distance(block.center).max(1.0);
        if best.is_none_or(|(b, _, _)| ratio > b) {
            best = Some((ratio, block.id, block.center));
        }
    }

    let Some((ratio, destination, target)) = best else {
        return Vec::new();
    };
    if current.is_some_and(|c| ratio <= c.utility) {
        return Vec::new();
    }
    vec![Desire::Migration(Migration {
        destination,
        target,
        utility: ratio,
        created_at: ctx.now(),
    })]
}

/// At most one item: fortify the current block when it is open and holds
/// enough material. Survivors only.
pub fn discover_barricading(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };
    if me.class != EntityClass::Survivor {
        return Vec::new();
    }
    let Some(block) = ctx.beliefs.current_block() else {
        return Vec::new();
    };
    if block.enclosed || block.resource_count <= ctx.config.barricade_threshold {
        return Vec::new();
    }
    vec![Desire::Barricading(Barricading {
        block: block.id,
        utility: count_f32(block.resource_count),
        created_at: ctx.now(),
    })]
}

/// One item per live hostile whose surroundings are safe to swarm.
pub fn discover_mobbing(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };

    ctx.beliefs
        .hostiles()
        .filter(|h| ctx.world.vitals(h.id).is_some_and(|v| v.alive))
        .filter_map(|hostile| {
            let odds = mob_odds(ctx, hostile.position);
            if !odds.is_safe(ctx.config.mob_ratio) {
                return None;
            }
            let advantage = odds.ally_sum / odds.hostile_sum.max(1.0);
            let distance = me.position.distance(hostile.position).max(1.0);
            Some(Desire::Mobbing(Mobbing {
                target: hostile.id,
                last_position: hostile.position,
                utility: advantage / distance,
            }))
        })
        .collect()
}

/// Sum live ally and hostile health around `point`.
///
/// Allies count when they stand within `mob_radius` of the point and have
/// an unobstructed line to it. The agent itself counts whenever its own
/// line is clear, wherever it stands. Hostiles count when within the
/// radius.
pub fn mob_odds(ctx: &DecisionContext<'_>, point: Vec2) -> MobOdds {
    let Some(me) = ctx.beliefs.me else {
        return MobOdds::default();
    };
    let config = ctx.config;
    let radius_sq = config.mob_radius * config.mob_radius;
    let clear = |from: Vec2| !ctx.world.is_obstructed(from, point, config.body_extent);
    let live_health = |id: EntityId| {
        ctx.world
            .vitals(id)
            .filter(|v| v.alive)
            .map(|v| v.health.max(0.0))
    };

    let mut odds = MobOdds::default();
    if clear(me.position) {
        odds.ally_sum += me.health.max(0.0);
    }
    for ally in ctx.beliefs.allies() {
        if ally.position.distance_squared(point) > radius_sq || !clear(ally.position) {
            continue;
        }
        odds.ally_sum += live_health(ally.id).unwrap_or(0.0);
    }
    for hostile in ctx.beliefs.hostiles() {
        if hostile.position.distance_squared(point) > radius_sq {
            continue;
        }
        odds.hostile_sum += live_health(hostile.id).unwrap_or(0.0);
    }
    odds
}
