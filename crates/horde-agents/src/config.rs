//! Tunable thresholds for belief building, discovery, and intentions.
//!
//! [`BehaviorConfig`] is the `behavior` section of `horde-config.yaml`.
//! Every field has a default, so a partial section (or none at all) is
//! valid. Distances are in world units, times in simulation seconds.

use serde::Deserialize;

/// Behaviour parameters shared by every agent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Radius within which entities are perceived (default: 20.0).
    pub perception_radius: f32,

    /// Sightings older than this are forgotten (default: 10.0).
    pub belief_max_age_secs: f64,

    /// Blocks whose centre lies within this radius are considered (default: 60.0).
    pub block_awareness_radius: f32,

    /// Floor applied to squared distances before dividing (default: 0.01).
    pub distance_epsilon: f32,

    /// Hostiles closer than this are individually avoided (default: 8.0).
    pub avoidance_range: f32,

    /// Numerator of the avoidance falloff (default: 4.0).
    pub avoidance_strength: f32,

    /// Squared outer radius of the threat window (default: 64.0).
    pub threat_radius_sq: f32,

    /// Squared inner radius of the threat window (default: 0.25).
    ///
    /// Hostiles this close are fought or individually avoided rather than
    /// fled as part of a crowd.
    pub threat_dead_zone_sq: f32,

    /// Length of the flee vector produced by threat avoidance (default: 1.0).
    pub threat_strength: f32,

    /// Personal-space radius between same-class humans (default: 1.5).
    pub crowd_radius: f32,

    /// Numerator of the separation falloff (default: 0.5).
    pub crowd_strength: f32,

    /// Resource potential a block must exceed before barricading (default: 10).
    pub barricade_threshold: u32,

    /// Radius of the mobbing safety census around a target (default: 6.0).
    pub mob_radius: f32,

    /// Hostile-to-ally health ratio below which mobbing is safe (default: 0.25).
    pub mob_ratio: f32,

    /// Half-width of an agent body for line-of-sight traces (default: 0.3).
    pub body_extent: f32,

    /// Distance at which an attack can land (default: 1.2).
    pub attack_range: f32,

    /// Distance at which a resource can be picked up or dropped (default: 1.0).
    pub interact_range: f32,

    /// How far ahead wall probes are cast (default: 1.5).
    pub wall_probe_distance: f32,

    /// Length of the push away from each blocked probe (default: 0.5).
    pub wall_strength: f32,

    /// Length of the wander heading (default: 0.3).
    pub wander_strength: f32,

    /// Maximum heading change per tick while wandering, radians (default: 0.5).
    pub wander_jitter: f32,

    /// Length of the route-following vector for migrations (default: 1.0).
    pub migration_strength: f32,

    /// Length of the route-following vector while barricading (default: 0.8).
    pub barricade_strength: f32,

    /// Length of the pursuit vector while mobbing (default: 1.0).
    pub mob_strength: f32,

    /// Length of the route-following vector for player orders (default: 1.5).
    pub player_strength: f32,

    /// Utility of a player order at the moment it is issued (default: 10.0).
    pub player_base_utility: f32,

    /// Utility a player order gains per second of age (default: 0.1).
    pub player_utility_growth: f32,

    /// Priority attached to barricade drops (default: 1.0).
    pub drop_priority: f32,

    /// Utility every block starts from (default: 1.0).
    pub block_base_utility: f32,

    /// Utility per resource unit inside a block (default: 0.5).
    pub block_resource_weight: f32,

    /// Utility bonus for an enclosed block (default: 10.0).
    pub block_enclosed_bonus: f32,

    /// Utility per survivor inside a block (default: 1.0).
    pub block_survivor_weight: f32,

    /// Utility penalty per zombie inside a block (default: 3.0).
    pub block_zombie_penalty: f32,

    /// Mixed into every agent's wander seed (default: 0).
    pub seed: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            perception_radius: 20.0,
            belief_max_age_secs: 10.0,
            block_awareness_radius: 60.0,
            distance_epsilon: 0.01,
            avoidance_range: 8.0,
            avoidance_strength: 4.0,
            threat_radius_sq: 64.0,
            threat_dead_zone_sq: 0.25,
            threat_strength: 1.0,
            crowd_radius: 1.5,
            crowd_strength: 0.5,
            barricade_threshold: 10,
            mob_radius: 6.0,
            mob_ratio: 0.25,
            body_extent: 0.3,
            attack_range: 1.2,
            interact_range: 1.0,
            wall_probe_distance: 1.5,
            wall_strength: 0.5,
            wander_strength: 0.3,
            wander_jitter: 0.5,
            migration_strength: 1.0,
            barricade_strength: 0.8,
            mob_strength: 1.0,
            player_strength: 1.5,
            player_base_utility: 10.0,
            player_utility_growth: 0.1,
            drop_priority: 1.0,
            block_base_utility: 1.0,
            block_resource_weight: 0.5,
            block_enclosed_bonus: 10.0,
            block_survivor_weight: 1.0,
            block_zombie_penalty: 3.0,
            seed: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn threat_window_defaults() {
        let config = BehaviorConfig::default();
        assert!((config.threat_radius_sq - 64.0).abs() < f32::EPSILON);
        assert!((config.threat_dead_zone_sq - 0.25).abs() < f32::EPSILON);
        assert!((config.mob_ratio - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.barricade_threshold, 10);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "mob_radius: 9.0\nseed: 7\n";
        let config: BehaviorConfig = serde_yml::from_str(yaml).unwrap();
        assert!((config.mob_radius - 9.0).abs() < f32::EPSILON);
        assert_eq!(config.seed, 7);
        assert!((config.avoidance_range - 8.0).abs() < f32::EPSILON);
    }
}
