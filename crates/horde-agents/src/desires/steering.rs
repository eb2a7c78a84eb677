//! Reactive steering desires.
//!
//! These are re-derived from beliefs every tick and never carried forward.
//! Each yields a vector whose magnitude is its urgency; duplicates of one
//! kind merge (avoidance, crowding, threats) or dedupe (walls, wander).

use std::collections::BTreeMap;

use horde_types::{EntityClass, EntityId, Vec2};

use crate::beliefs::count_f32;
use crate::context::{DecisionContext, secs_f32};

use super::Desire;

/// Steer away from one or more individual hostiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avoidance {
    /// Push away from the hostile(s); magnitude is urgency.
    pub vector: Vec2,
}

impl Avoidance {
    /// Combine two avoidance pushes by vector summation.
    pub fn merge(self, other: Self) -> Self {
        Self {
            vector: self.vector + other.vector,
        }
    }
}

/// Keep personal space from nearby humans of the same class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrowdAvoidance {
    /// Separation push; magnitude is urgency.
    pub vector: Vec2,
}

impl CrowdAvoidance {
    /// Combine two separation pushes by vector summation.
    pub fn merge(self, other: Self) -> Self {
        Self {
            vector: self.vector + other.vector,
        }
    }
}

/// Flee the aggregate of close hostiles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreatAvoidance {
    /// Last-known position of every threat, keyed by entity.
    pub threats: BTreeMap<EntityId, Vec2>,
}

impl ThreatAvoidance {
    /// Union of both threat sets. On a shared key the receiver's position
    /// is kept.
    pub fn merge(mut self, other: Self) -> Self {
        for (id, position) in other.threats {
            self.threats.entry(id).or_insert(position);
        }
        self
    }

    /// Unit flee heading from `from`, scaled by `strength`.
    pub fn flee_vector(&self, from: Vec2, strength: f32) -> Vec2 {
        let away: Vec2 = self
            .threats
            .values()
            .map(|p| (from - *p).normalize_or_zero())
            .sum();
        away.normalize_or_zero() * strength
    }

    /// Number of threats, as a utility.
    pub fn weight(&self) -> f32 {
        count_f32(u32::try_from(self.threats.len()).unwrap_or(u32::MAX))
    }
}

/// Push away from non-navigable terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallAvoidance {
    /// Sum of pushes away from blocked probes; zero in open ground.
    pub vector: Vec2,
}

/// Ambient random walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wander {
    /// Length of the wander heading.
    pub strength: f32,
}

/// Number of wall probes cast around the agent.
const WALL_PROBES: u8 = 8;

/// One item per hostile within avoidance range. Survivors only.
pub fn discover_avoidance(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };
    if me.class != EntityClass::Survivor {
        return Vec::new();
    }
    let config = ctx.config;
    let range_sq = config.avoidance_range * config.avoidance_range;

    ctx.beliefs
        .hostiles()
        .filter_map(|hostile| {
            let d2 = hostile.position.distance_squared(me.position);
            if d2 > range_sq {
                return None;
            }
            let direction = (me.position - hostile.position).normalize_or_zero();
            if direction.is_zero() {
                return None;
            }
            let staleness = 1.0 + secs_f32(hostile.age(ctx.now()));
            let magnitude =
                config.avoidance_strength / (d2.max(config.distance_epsilon) * staleness * staleness);
            Some(Desire::Avoidance(Avoidance {
                vector: direction * magnitude,
            }))
        })
        .collect()
}

/// At most one item aggregating every hostile inside the threat window.
/// Survivors only.
pub fn discover_threat_avoidance(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };
    if me.class != EntityClass::Survivor {
        return Vec::new();
    }
    let config = ctx.config;
    let threats: BTreeMap<EntityId, Vec2> = ctx
        .beliefs
        .hostiles()
        .filter(|h| {
            let d2 = h.position.distance_squared(me.position);
            d2 >= config.threat_dead_zone_sq && d2 < config.threat_radius_sq
        })
        .map(|h| (h.id, h.position))
        .collect();

    if threats.is_empty() {
        Vec::new()
    } else {
        vec![Desire::ThreatAvoidance(ThreatAvoidance { threats })]
    }
}

/// One item per same-class human within crowd radius.
pub fn discover_crowd_avoidance(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(me) = ctx.beliefs.me else {
        return Vec::new();
    };
    let config = ctx.config;
    let radius_sq = config.crowd_radius * config.crowd_radius;

    ctx.beliefs
        .allies()
        .filter_map(|ally| {
            let d2 = ally.position.distance_squared(me.position);
            if d2 > radius_sq {
                return None;
            }
            let direction = (me.position - ally.position).normalize_or_zero();
            if direction.is_zero() {
                return None;
            }
            let magnitude = config.crowd_strength / d2.max(config.distance_epsilon);
            Some(Desire::CrowdAvoidance(CrowdAvoidance {
                vector: direction * magnitude,
            }))
        })
        .collect()
}

/// Exactly one item for a positioned agent, possibly a zero push.
pub fn discover_wall_avoidance(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let Some(position) = ctx.position() else {
        return Vec::new();
    };
    let step = core::f32::consts::TAU / f32::from(WALL_PROBES);
    let vector: Vec2 = (0..WALL_PROBES)
        .map(|i| Vec2::from_angle(step * f32::from(i)))
        .filter(|dir| !ctx.world.is_navigable(position + *dir * ctx.config.wall_probe_distance))
        .map(|dir| -dir * ctx.config.wall_strength)
        .sum();
    vec![Desire::WallAvoidance(WallAvoidance { vector })]
}

/// Exactly one item for a positioned agent.
pub fn discover_wander(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    if ctx.position().is_none() {
        return Vec::new();
    }
    vec![Desire::Wander(Wander {
        strength: ctx.config.wander_strength,
    })]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use horde_types::{Bounds, EntityClass};
    use horde_world::GridWorld;

    use super::*;
    use crate::beliefs::build_beliefs;
    use crate::config::BehaviorConfig;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn open_world() -> GridWorld {
        let mut world = GridWorld::new();
        world
            .add_block(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0)))
            .unwrap();
        world
    }

    #[test]
    fn avoidance_sums_pushes() {
        let merged = Avoidance {
            vector: Vec2::new(1.0, 0.0),
        }
        .merge(Avoidance {
            vector: Vec2::new(0.0, 1.0),
        });
        assert!(close(merged.vector.x, 1.0));
        assert!(close(merged.vector.y, 1.0));
        assert!(close(merged.vector.length(), core::f32::consts::SQRT_2));
    }

    #[test]
    fn threat_merge_is_union() {
        let a = EntityId::new();
        let b = EntityId::new();
        let left = ThreatAvoidance {
            threats: BTreeMap::from([(a, Vec2::new(1.0, 0.0))]),
        };
        let right = ThreatAvoidance {
            threats: BTreeMap::from([(a, Vec2::new(9.0, 9.0)), (b, Vec2::new(0.0, 2.0))]),
        };
        let merged = left.merge(right);
        assert_eq!(merged.threats.len(), 2);
        assert!(close(merged.threats.get(&a).unwrap().x, 1.0));
    }

    #[test]
    fn avoidance_falls_off_with_distance_and_age() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(10.0, 10.0), 100.0)
            .unwrap();
        world
            .spawn_human(EntityClass::Zombie, Vec2::new(12.0, 10.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, world.time(), &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let found = discover_avoidance(&ctx);
        assert_eq!(found.len(), 1);
        let Desire::Avoidance(push) = &found[0] else {
            panic!("expected avoidance");
        };
        // strength 4 / (d^2 4 * (1 + 0)^2) = 1, pointing away along -x.
        assert!(close(push.vector.x, -1.0));
        assert!(close(push.vector.y, 0.0));
    }

    #[test]
    fn zombies_do_not_avoid() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Zombie, Vec2::new(10.0, 10.0), 100.0)
            .unwrap();
        world
            .spawn_human(EntityClass::Survivor, Vec2::new(12.0, 10.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);
        assert!(discover_avoidance(&ctx).is_empty());
        assert!(discover_threat_avoidance(&ctx).is_empty());
    }

    #[test]
    fn threat_window_excludes_dead_zone_and_far() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(20.0, 20.0), 100.0)
            .unwrap();
        let inside = world
            .spawn_human(EntityClass::Zombie, Vec2::new(23.0, 20.0), 100.0)
            .unwrap();
        let too_close = world
            .spawn_human(EntityClass::Zombie, Vec2::new(20.3, 20.0), 100.0)
            .unwrap();
        let too_far = world
            .spawn_human(EntityClass::Zombie, Vec2::new(29.0, 20.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let found = discover_threat_avoidance(&ctx);
        assert_eq!(found.len(), 1);
        let Desire::ThreatAvoidance(threat) = &found[0] else {
            panic!("expected threat avoidance");
        };
        assert!(threat.threats.contains_key(&inside));
        assert!(!threat.threats.contains_key(&too_close));
        assert!(!threat.threats.contains_key(&too_far));
    }

    #[test]
    fn crowding_pushes_apart() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Zombie, Vec2::new(10.0, 10.0), 100.0)
            .unwrap();
        world
            .spawn_human(EntityClass::Zombie, Vec2::new(10.0, 11.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let found = discover_crowd_avoidance(&ctx);
        assert_eq!(found.len(), 1);
        let Desire::CrowdAvoidance(push) = &found[0] else {
            panic!("expected crowd avoidance");
        };
        assert!(push.vector.y < 0.0);
    }

    #[test]
    fn wall_probe_pushes_off_the_edge() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(0.5, 20.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let found = discover_wall_avoidance(&ctx);
        assert_eq!(found.len(), 1);
        let Desire::WallAvoidance(wall) = &found[0] else {
            panic!("expected wall avoidance");
        };
        assert!(wall.vector.x > 0.0);
    }

    #[test]
    fn open_ground_still_yields_ambient_items() {
        let mut world = open_world();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(20.0, 20.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let walls = discover_wall_avoidance(&ctx);
        assert_eq!(walls.len(), 1);
        assert!(matches!(walls[0], Desire::WallAvoidance(w) if w.vector.is_zero()));
        assert_eq!(discover_wander(&ctx).len(), 1);
    }
}
