//! Pairwise reduction of candidate desires into a conflict-free set.
//!
//! [`resolve`] repeatedly finds the first conflicting pair (in input
//! order), replaces the earlier one with the pair's resolution, and drops
//! the later one. Each replacement shrinks the set by one, so the loop
//! ends after at most `n - 1` merges. Input order matters only for ties
//! that keep "the first" desire.

use horde_agents::Desire;

/// Reduce `desires` until no two remaining desires conflict.
pub fn resolve(mut desires: Vec<Desire>) -> Vec<Desire> {
    while let Some((i, j)) = first_conflict(&desires) {
        let later = desires.remove(j);
        let earlier = desires.remove(i);
        tracing::trace!(
            earlier = %earlier.kind(),
            later = %later.kind(),
            "Resolving desire conflict"
        );
        desires.insert(i, earlier.resolve_conflict(later));
    }
    desires
}

/// Indices `(i, j)`, `i < j`, of the first conflicting pair.
fn first_conflict(desires: &[Desire]) -> Option<(usize, usize)> {
    desires.iter().enumerate().find_map(|(i, a)| {
        desires
            .iter()
            .enumerate()
            .skip(i.saturating_add(1))
            .find(|(_, b)| a.conflicts_with(b))
            .map(|(j, _)| (i, j))
    })
}

/// Whether no two desires in the slice conflict.
pub fn is_conflict_free(desires: &[Desire]) -> bool {
    first_conflict(desires).is_none()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use horde_agents::desires::{
        Avoidance, Barricading, CrowdAvoidance, Migration, Mobbing, PlayerMovement,
        ThreatAvoidance, WallAvoidance, Wander,
    };
    use horde_types::{BlockId, DesireKind, EntityId, Vec2};

    use super::*;

    fn avoidance(x: f32, y: f32) -> Desire {
        Desire::Avoidance(Avoidance {
            vector: Vec2::new(x, y),
        })
    }

    fn migration(destination: BlockId, created_at: f64) -> Desire {
        Desire::Migration(Migration {
            destination,
            target: Vec2::ZERO,
            utility: 1.0,
            created_at,
        })
    }

    fn wander() -> Desire {
        Desire::Wander(Wander { strength: 0.3 })
    }

    fn wall() -> Desire {
        Desire::WallAvoidance(WallAvoidance { vector: Vec2::ZERO })
    }

    #[test]
    fn singleton_is_unchanged() {
        let input = vec![avoidance(1.0, 2.0)];
        assert_eq!(resolve(input.clone()), input);
        assert!(resolve(Vec::new()).is_empty());
    }

    #[test]
    fn avoidance_pushes_sum() {
        let resolved = resolve(vec![avoidance(1.0, 0.0), avoidance(0.0, 1.0)]);
        assert_eq!(resolved.len(), 1);
        let Some(Desire::Avoidance(push)) = resolved.first() else {
            panic!("expected avoidance");
        };
        assert!((push.vector.x - 1.0).abs() < 1e-6);
        assert!((push.vector.y - 1.0).abs() < 1e-6);
        assert!((push.vector.length() - core::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn earliest_migration_survives() {
        let dest = BlockId::new();
        let resolved = resolve(vec![migration(dest, 12.0), migration(dest, 10.0)]);
        assert_eq!(resolved.len(), 1);
        let Some(Desire::Migration(kept)) = resolved.first() else {
            panic!("expected migration");
        };
        assert!((kept.created_at - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ambient_pair_survives_alone() {
        let resolved = resolve(vec![wall(), wander(), wall(), wander()]);
        let kinds: Vec<DesireKind> = resolved.iter().map(Desire::kind).collect();
        assert_eq!(kinds, vec![DesireKind::WallAvoidance, DesireKind::Wander]);
    }

    #[test]
    fn player_order_clears_goals() {
        let order = Desire::PlayerMovement(PlayerMovement {
            order: 3,
            destination: Vec2::new(4.0, 4.0),
            issued_at: 0.0,
            base_utility: 10.0,
            growth: 0.1,
        });
        let resolved = resolve(vec![
            migration(BlockId::new(), 0.0),
            Desire::Barricading(Barricading {
                block: BlockId::new(),
                utility: 11.0,
                created_at: 0.0,
            }),
            Desire::Mobbing(Mobbing {
                target: EntityId::new(),
                last_position: Vec2::ZERO,
                utility: 5.0,
            }),
            order,
            wander(),
        ]);
        let kinds: Vec<DesireKind> = resolved.iter().map(Desire::kind).collect();
        assert_eq!(kinds, vec![DesireKind::PlayerMovement, DesireKind::Wander]);
    }

    #[test]
    fn mixed_input_ends_conflict_free() {
        let dest = BlockId::new();
        let input = vec![
            avoidance(1.0, 0.0),
            Desire::CrowdAvoidance(CrowdAvoidance {
                vector: Vec2::new(0.1, 0.0),
            }),
            migration(dest, 3.0),
            migration(BlockId::new(), 1.0),
            Desire::ThreatAvoidance(ThreatAvoidance {
                threats: BTreeMap::from([(EntityId::new(), Vec2::new(2.0, 0.0))]),
            }),
            avoidance(0.0, -1.0),
            Desire::Mobbing(Mobbing {
                target: EntityId::new(),
                last_position: Vec2::ZERO,
                utility: 2.0,
            }),
            migration(dest, 2.0),
            Desire::Barricading(Barricading {
                block: BlockId::new(),
                utility: 11.0,
                created_at: 0.0,
            }),
            Desire::ThreatAvoidance(ThreatAvoidance {
                threats: BTreeMap::from([(EntityId::new(), Vec2::new(0.0, 2.0))]),
            }),
            wander(),
            wall(),
            wander(),
        ];
        let resolved = resolve(input);
        assert!(is_conflict_free(&resolved));
        assert!(resolved.iter().all(|d| d.kind() != DesireKind::ThreatAvoidance));
        assert!(resolved.iter().all(|d| d.kind() != DesireKind::Barricading));
        let migrations = resolved
            .iter()
            .filter(|d| d.kind() == DesireKind::Migration)
            .count();
        assert_eq!(migrations, 2);
    }
}
