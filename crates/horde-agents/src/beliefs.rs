//! Per-tick belief snapshots.
//!
//! [`build_beliefs`] queries the world once per agent per tick and freezes
//! the answers into a [`Beliefs`] value. Everything downstream (discovery,
//! intention checks, action production) reads the snapshot rather than
//! re-querying, so one agent's decision sees one consistent world.
//!
//! Perception is stale-tolerant: an entity is remembered at its last
//! sighted position until the sighting is older than
//! [`BehaviorConfig::belief_max_age_secs`].

use std::collections::{BTreeMap, BTreeSet};

use horde_types::{BlockBeliefs, BlockId, EntityBeliefs, EntityClass, EntityId, SelfBeliefs, Vec2};
use horde_world::WorldView;

use crate::config::BehaviorConfig;

/// What one agent knows at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Beliefs {
    /// The agent's own state; `None` when it has no valid position.
    pub me: Option<SelfBeliefs>,
    /// Perceived entities ordered by distance, then id.
    pub entities: Vec<EntityBeliefs>,
    /// Aggregates for every block the agent is aware of.
    pub blocks: BTreeMap<BlockId, BlockBeliefs>,
    /// Simulation time of the snapshot, in seconds.
    pub now: f64,
}

impl Beliefs {
    /// A snapshot with no self state, no entities and no blocks.
    pub const fn empty(now: f64) -> Self {
        Self {
            me: None,
            entities: Vec::new(),
            blocks: BTreeMap::new(),
            now,
        }
    }

    /// The agent's position, if it has one.
    pub fn position(&self) -> Option<Vec2> {
        self.me.map(|me| me.position)
    }

    /// Aggregates for the block the agent stands in.
    pub fn current_block(&self) -> Option<&BlockBeliefs> {
        self.me
            .and_then(|me| me.block)
            .and_then(|block| self.blocks.get(&block))
    }

    /// Aggregates for a known block.
    pub fn block(&self, id: BlockId) -> Option<&BlockBeliefs> {
        self.blocks.get(&id)
    }

    /// Last-known state of a perceived entity.
    pub fn entity(&self, id: EntityId) -> Option<&EntityBeliefs> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Perceived entities hostile to the agent, nearest first.
    pub fn hostiles(&self) -> impl Iterator<Item = &EntityBeliefs> {
        let class = self.me.map(|me| me.class);
        self.entities
            .iter()
            .filter(move |e| class.is_some_and(|c| c.is_hostile_to(e.class)))
    }

    /// Perceived entities of the agent's own class, nearest first.
    pub fn allies(&self) -> impl Iterator<Item = &EntityBeliefs> {
        let class = self.me.map(|me| me.class);
        self.entities
            .iter()
            .filter(move |e| class == Some(e.class))
    }

    /// Perceived resources last seen inside `block`, nearest first.
    pub fn resources_in(&self, block: BlockId) -> impl Iterator<Item = &EntityBeliefs> {
        self.entities
            .iter()
            .filter(move |e| e.class.is_resource() && e.block == Some(block) && e.resource_units > 0)
    }
}

/// Build the snapshot for `agent` at time `now`.
///
/// `extra_blocks` lists blocks the agent's live intentions still refer to,
/// so their aggregates stay available even when out of awareness range.
/// Never fails: an agent the world cannot locate gets [`Beliefs::empty`].
pub fn build_beliefs(
    agent: EntityId,
    world: &dyn WorldView,
    config: &BehaviorConfig,
    now: f64,
    extra_blocks: &[BlockId],
) -> Beliefs {
    let Some(me) = world.locate(agent) else {
        tracing::debug!(agent = %agent, "Agent has no position; empty beliefs");
        return Beliefs::empty(now);
    };

    let mut entities: Vec<EntityBeliefs> = world
        .perceive(agent, config.perception_radius)
        .into_iter()
        .filter(|e| e.id != agent && e.age(now) <= config.belief_max_age_secs)
        .collect();
    entities.sort_by(|a, b| {
        let da = a.position.distance_squared(me.position);
        let db = b.position.distance_squared(me.position);
        da.total_cmp(&db).then_with(|| a.id.cmp(&b.id))
    });

    let mut wanted: BTreeSet<BlockId> = world
        .blocks_near(me.position, config.block_awareness_radius)
        .into_iter()
        .collect();
    wanted.extend(me.block);
    wanted.extend(extra_blocks.iter().copied());

    let blocks = wanted
        .into_iter()
        .filter_map(|id| summarize_block(world, config, id).map(|b| (id, b)))
        .collect();

    Beliefs {
        me: Some(me),
        entities,
        blocks,
        now,
    }
}

/// Aggregate one block from its census.
fn summarize_block(
    world: &dyn WorldView,
    config: &BehaviorConfig,
    id: BlockId,
) -> Option<BlockBeliefs> {
    let geometry = world.geometry(id)?;
    let census = world.census(id);

    let mut resource_count: u32 = 0;
    let mut survivors: u32 = 0;
    let mut zombies: u32 = 0;
    for entity in &census {
        match entity.class {
            EntityClass::Survivor => survivors = survivors.saturating_add(1),
            EntityClass::Zombie => zombies = zombies.saturating_add(1),
            EntityClass::ResourcePile | EntityClass::ResourceSource => {
                resource_count = resource_count.saturating_add(entity.resource_units);
            }
        }
    }

    let enclosed_bonus = if geometry.enclosed {
        config.block_enclosed_bonus
    } else {
        0.0
    };
    let utility = config.block_zombie_penalty.mul_add(
        -count_f32(zombies),
        config.block_survivor_weight.mul_add(
            count_f32(survivors),
            config
                .block_resource_weight
                .mul_add(count_f32(resource_count), config.block_base_utility + enclosed_bonus),
        ),
    );

    Some(BlockBeliefs {
        id,
        utility,
        resource_count,
        enclosed: geometry.enclosed,
        center: geometry.bounds.center(),
        bounds: geometry.bounds,
    })
}

/// Widen a census count for utility math.
#[allow(clippy::cast_precision_loss)]
pub(crate) const fn count_f32(count: u32) -> f32 {
    // Counts stay far below 2^24, where f32 stops being exact.
    count as f32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use horde_types::Bounds;
    use horde_world::GridWorld;

    use super::*;

    fn square(min: f32, max: f32) -> Bounds {
        Bounds::new(Vec2::new(min, min), Vec2::new(max, max))
    }

    #[test]
    fn unlocated_agent_gets_empty_snapshot() {
        let world = GridWorld::new();
        let beliefs = build_beliefs(EntityId::new(), &world, &BehaviorConfig::default(), 3.0, &[]);
        assert!(beliefs.me.is_none());
        assert!(beliefs.entities.is_empty());
        assert!(beliefs.blocks.is_empty());
        assert!((beliefs.now - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entities_sorted_by_distance() {
        let mut world = GridWorld::new();
        world.add_block(square(0.0, 20.0)).unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        let far = world
            .spawn_human(EntityClass::Zombie, Vec2::new(12.0, 5.0), 100.0)
            .unwrap();
        let near = world
            .spawn_human(EntityClass::Zombie, Vec2::new(7.0, 5.0), 100.0)
            .unwrap();

        let beliefs = build_beliefs(me, &world, &BehaviorConfig::default(), 0.0, &[]);
        let ids: Vec<EntityId> = beliefs.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![near, far]);
        assert_eq!(beliefs.hostiles().count(), 2);
        assert_eq!(beliefs.allies().count(), 0);
    }

    #[test]
    fn stale_sightings_are_forgotten() {
        let mut world = GridWorld::new();
        world.add_block(square(0.0, 20.0)).unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        let hidden = world
            .spawn_human(EntityClass::Zombie, Vec2::new(8.0, 5.0), 100.0)
            .unwrap();
        world.set_concealed(hidden, true).unwrap();
        world.advance(4.0);

        let config = BehaviorConfig {
            belief_max_age_secs: 5.0,
            ..BehaviorConfig::default()
        };
        let fresh = build_beliefs(me, &world, &config, world.time(), &[]);
        assert!(fresh.entity(hidden).is_some());

        world.advance(2.0);
        let stale = build_beliefs(me, &world, &config, world.time(), &[]);
        assert!(stale.entity(hidden).is_none());
    }

    #[test]
    fn block_utility_counts_resources_and_zombies() {
        let mut world = GridWorld::new();
        let home = world.add_block(square(0.0, 10.0)).unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        world
            .spawn_resource(EntityClass::ResourcePile, Vec2::new(2.0, 2.0), 4)
            .unwrap();
        world
            .spawn_human(EntityClass::Zombie, Vec2::new(8.0, 8.0), 100.0)
            .unwrap();

        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let block = beliefs.current_block().unwrap();
        assert_eq!(block.id, home);
        assert_eq!(block.resource_count, 4);
        // 1 base + 4 * 0.5 resources + 1 survivor - 3 per zombie
        assert!((block.utility - 1.0).abs() < 1e-5);
        assert_eq!(beliefs.resources_in(home).count(), 1);
    }

    #[test]
    fn extra_blocks_are_summarized() {
        let mut world = GridWorld::new();
        world.add_block(square(0.0, 10.0)).unwrap();
        let remote = world.add_block(square(500.0, 510.0)).unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();

        let config = BehaviorConfig::default();
        let without = build_beliefs(me, &world, &config, 0.0, &[]);
        assert!(without.block(remote).is_none());
        let with = build_beliefs(me, &world, &config, 0.0, &[remote]);
        assert!(with.block(remote).is_some());
    }
}
