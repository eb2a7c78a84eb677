//! Enumeration types shared across the Horde workspace.
//!
//! All enums derive `Serialize`/`Deserialize` so they can appear in tick
//! summaries and configuration, and `Ord` so collections keyed by them
//! iterate in a deterministic order.

use serde::{Deserialize, Serialize};

/// Coarse classification of a perceived entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    /// A living human agent.
    Survivor,
    /// A turned human agent.
    Zombie,
    /// A loose pile of barricade material that can be carried directly.
    ResourcePile,
    /// A breakable fixture (furniture, wreck) that yields material.
    ResourceSource,
}

impl EntityClass {
    /// Whether this class is a human agent (survivor or zombie).
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Survivor | Self::Zombie)
    }

    /// Whether this class is barricade material.
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::ResourcePile | Self::ResourceSource)
    }

    /// Whether an agent of this class treats `other` as hostile.
    ///
    /// Survivors and zombies are mutually hostile; resources are never
    /// hostile and never hostile to anything.
    pub const fn is_hostile_to(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Survivor, Self::Zombie) | (Self::Zombie, Self::Survivor)
        )
    }
}

/// The kind of a desire, and therefore of the intention it spawns.
///
/// An agent holds at most one live intention per kind. The declaration
/// order is the order in which intentions are drained each tick, which
/// fixes the first-encountered tie-break of the action aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesireKind {
    /// An explicit movement order issued by a controlling player.
    PlayerMovement,
    /// Swarm a weakened hostile together with allies.
    Mobbing,
    /// Relocate to a more desirable block.
    Migration,
    /// Fortify the current block with loose material.
    Barricading,
    /// Flee the aggregate of close hostiles.
    ThreatAvoidance,
    /// Steer away from an individual hostile.
    Avoidance,
    /// Keep personal space from others of the same class.
    CrowdAvoidance,
    /// Steer away from non-navigable terrain.
    WallAvoidance,
    /// Ambient random walk.
    Wander,
}

impl DesireKind {
    /// Every kind, in drain order.
    pub const ALL: [Self; 9] = [
        Self::PlayerMovement,
        Self::Mobbing,
        Self::Migration,
        Self::Barricading,
        Self::ThreatAvoidance,
        Self::Avoidance,
        Self::CrowdAvoidance,
        Self::WallAvoidance,
        Self::Wander,
    ];

    /// Whether a desire of this kind is carried into the next tick's
    /// arbitration by the intention it backs.
    ///
    /// Reactive steering kinds are re-derived from beliefs every tick and
    /// are not carried.
    pub const fn is_persistent(self) -> bool {
        matches!(
            self,
            Self::PlayerMovement | Self::Mobbing | Self::Migration | Self::Barricading
        )
    }
}

impl core::fmt::Display for DesireKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::PlayerMovement => "player_movement",
            Self::Mobbing => "mobbing",
            Self::Migration => "migration",
            Self::Barricading => "barricading",
            Self::ThreatAvoidance => "threat_avoidance",
            Self::Avoidance => "avoidance",
            Self::CrowdAvoidance => "crowd_avoidance",
            Self::WallAvoidance => "wall_avoidance",
            Self::Wander => "wander",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostility_is_symmetric_between_humans() {
        assert!(EntityClass::Survivor.is_hostile_to(EntityClass::Zombie));
        assert!(EntityClass::Zombie.is_hostile_to(EntityClass::Survivor));
        assert!(!EntityClass::Survivor.is_hostile_to(EntityClass::Survivor));
        assert!(!EntityClass::Zombie.is_hostile_to(EntityClass::ResourcePile));
    }

    #[test]
    fn all_kinds_are_sorted() {
        let mut sorted = DesireKind::ALL;
        sorted.sort();
        assert_eq!(sorted, DesireKind::ALL);
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in DesireKind::ALL {
            let json = serde_json::to_string(&kind).unwrap_or_default();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn only_goal_kinds_persist() {
        assert!(DesireKind::Migration.is_persistent());
        assert!(DesireKind::PlayerMovement.is_persistent());
        assert!(!DesireKind::Avoidance.is_persistent());
        assert!(!DesireKind::Wander.is_persistent());
    }
}
