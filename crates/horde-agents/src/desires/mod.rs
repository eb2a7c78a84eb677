//! The desire catalog: candidate goals with utility and conflict rules.
//!
//! A [`Desire`] is a value. Discovery builds a fresh batch every tick from
//! the agent's beliefs; arbitration then reduces the batch pairwise with
//! [`Desire::conflicts_with`] and [`Desire::resolve_conflict`] until no two
//! remaining desires conflict. There is no global ranking: each rule only
//! ever looks at two desires at once.
//!
//! # Conflict table
//!
//! | pair                              | outcome                          |
//! |-----------------------------------|----------------------------------|
//! | avoidance / avoidance             | vectors summed                   |
//! | crowd / crowd                     | vectors summed                   |
//! | threat / threat                   | threat sets unioned              |
//! | wall / wall, wander / wander      | first kept                       |
//! | migration / migration (same dest) | earlier `created_at` wins        |
//! | barricading / barricading         | earlier `created_at` wins        |
//! | barricading / migration           | migration                        |
//! | mobbing / mobbing                 | higher utility (ties: first)     |
//! | mobbing / threat                  | mobbing                          |
//! | player / player                   | most recently issued             |
//! | player / migration, barricading, mobbing | player                    |

pub mod command;
pub mod goals;
pub mod steering;

use horde_types::{BlockId, DesireKind, EntityId};

use crate::context::DecisionContext;
use crate::intentions::{
    BarricadeIntention, CommandIntention, Intention, MigrateIntention, MobIntention,
    SteerIntention, WanderIntention,
};

pub use command::PlayerMovement;
pub use goals::{Barricading, MobOdds, Migration, Mobbing};
pub use steering::{Avoidance, CrowdAvoidance, ThreatAvoidance, WallAvoidance, Wander};

/// What a desire is about, beyond its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    /// Nothing beyond the kind itself.
    Unbound,
    /// A block (migration destination, barricaded block).
    Block(BlockId),
    /// An entity (mobbing target).
    Entity(EntityId),
    /// A player order number.
    Order(u64),
}

/// Identity used to match a surviving desire with the intention it backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DesireKey {
    /// The desire kind.
    pub kind: DesireKind,
    /// The thing the desire is about.
    pub subject: Subject,
}

/// A candidate goal.
#[derive(Debug, Clone, PartialEq)]
pub enum Desire {
    /// Explicit player order.
    PlayerMovement(PlayerMovement),
    /// Swarm a hostile.
    Mobbing(Mobbing),
    /// Move to a better block.
    Migration(Migration),
    /// Fortify the current block.
    Barricading(Barricading),
    /// Flee close hostiles.
    ThreatAvoidance(ThreatAvoidance),
    /// Steer away from a hostile.
    Avoidance(Avoidance),
    /// Keep personal space.
    CrowdAvoidance(CrowdAvoidance),
    /// Steer off non-navigable terrain.
    WallAvoidance(WallAvoidance),
    /// Random walk.
    Wander(Wander),
}

impl Desire {
    /// The kind of this desire.
    pub const fn kind(&self) -> DesireKind {
        match self {
            Self::PlayerMovement(_) => DesireKind::PlayerMovement,
            Self::Mobbing(_) => DesireKind::Mobbing,
            Self::Migration(_) => DesireKind::Migration,
            Self::Barricading(_) => DesireKind::Barricading,
            Self::ThreatAvoidance(_) => DesireKind::ThreatAvoidance,
            Self::Avoidance(_) => DesireKind::Avoidance,
            Self::CrowdAvoidance(_) => DesireKind::CrowdAvoidance,
            Self::WallAvoidance(_) => DesireKind::WallAvoidance,
            Self::Wander(_) => DesireKind::Wander,
        }
    }

    /// Identity for intention matching.
    pub const fn key(&self) -> DesireKey {
        let subject = match self {
            Self::PlayerMovement(p) => Subject::Order(p.order),
            Self::Mobbing(m) => Subject::Entity(m.target),
            Self::Migration(m) => Subject::Block(m.destination),
            Self::Barricading(b) => Subject::Block(b.block),
            Self::ThreatAvoidance(_)
            | Self::Avoidance(_)
            | Self::CrowdAvoidance(_)
            | Self::WallAvoidance(_)
            | Self::Wander(_) => Subject::Unbound,
        };
        DesireKey {
            kind: self.kind(),
            subject,
        }
    }

    /// Scalar utility at time `now`.
    pub fn utility(&self, now: f64) -> f32 {
        match self {
            Self::PlayerMovement(p) => p.utility(now),
            Self::Mobbing(m) => m.utility,
            Self::Migration(m) => m.utility,
            Self::Barricading(b) => b.utility,
            Self::ThreatAvoidance(t) => t.weight(),
            Self::Avoidance(a) => a.vector.length(),
            Self::CrowdAvoidance(c) => c.vector.length(),
            Self::WallAvoidance(w) => w.vector.length(),
            Self::Wander(w) => w.strength,
        }
    }

    /// Whether the two desires cannot both stand. Symmetric.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        use DesireKind as K;
        match (self, other) {
            (Self::Migration(a), Self::Migration(b)) => a.destination == b.destination,
            _ => matches!(
                (self.kind(), other.kind()),
                (K::PlayerMovement, K::PlayerMovement)
                    | (K::Mobbing, K::Mobbing)
                    | (K::Barricading, K::Barricading)
                    | (K::ThreatAvoidance, K::ThreatAvoidance)
                    | (K::Avoidance, K::Avoidance)
                    | (K::CrowdAvoidance, K::CrowdAvoidance)
                    | (K::WallAvoidance, K::WallAvoidance)
                    | (K::Wander, K::Wander)
                    | (K::Barricading, K::Migration)
                    | (K::Migration, K::Barricading)
                    | (K::Mobbing, K::ThreatAvoidance)
                    | (K::ThreatAvoidance, K::Mobbing)
                    | (
                        K::PlayerMovement,
                        K::Migration | K::Barricading | K::Mobbing
                    )
                    | (
                        K::Migration | K::Barricading | K::Mobbing,
                        K::PlayerMovement
                    )
            ),
        }
    }

    /// The single desire replacing a conflicting pair.
    ///
    /// Only meaningful when [`conflicts_with`](Self::conflicts_with) holds;
    /// for a non-conflicting pair the receiver is returned unchanged.
    pub fn resolve_conflict(self, other: Self) -> Self {
        match (self, other) {
            (Self::Avoidance(a), Self::Avoidance(b)) => Self::Avoidance(a.merge(b)),
            (Self::CrowdAvoidance(a), Self::CrowdAvoidance(b)) => Self::CrowdAvoidance(a.merge(b)),
            (Self::ThreatAvoidance(a), Self::ThreatAvoidance(b)) => {
                Self::ThreatAvoidance(a.merge(b))
            }
            (Self::Migration(a), Self::Migration(b)) => {
                Self::Migration(if b.created_at < a.created_at { b } else { a })
            }
            (Self::Barricading(a), Self::Barricading(b)) => {
                Self::Barricading(if b.created_at < a.created_at { b } else { a })
            }
            (Self::Mobbing(a), Self::Mobbing(b)) => {
                Self::Mobbing(if b.utility > a.utility { b } else { a })
            }
            (Self::PlayerMovement(a), Self::PlayerMovement(b)) => {
                Self::PlayerMovement(if b.supersedes(&a) { b } else { a })
            }
            (migration @ Self::Migration(_), Self::Barricading(_))
            | (Self::Barricading(_), migration @ Self::Migration(_)) => migration,
            (mob @ Self::Mobbing(_), Self::ThreatAvoidance(_))
            | (Self::ThreatAvoidance(_), mob @ Self::Mobbing(_)) => mob,
            (
                order @ Self::PlayerMovement(_),
                Self::Migration(_) | Self::Barricading(_) | Self::Mobbing(_),
            )
            | (
                Self::Migration(_) | Self::Barricading(_) | Self::Mobbing(_),
                order @ Self::PlayerMovement(_),
            ) => order,
            (first, _) => first,
        }
    }

    /// Spawn the intention that pursues this desire.
    pub fn into_intention(self, ctx: &DecisionContext<'_>) -> Intention {
        match self {
            Self::PlayerMovement(order) => Intention::Command(CommandIntention::new(order, ctx)),
            Self::Mobbing(mob) => Intention::Mob(MobIntention::new(mob)),
            Self::Migration(migration) => Intention::Migrate(MigrateIntention::new(migration, ctx)),
            Self::Barricading(barricade) => Intention::Barricade(BarricadeIntention::new(barricade)),
            Self::Wander(wander) => {
                let seed = ctx.agent.seed_bits() ^ ctx.config.seed;
                Intention::Wander(WanderIntention::new(wander, seed))
            }
            steer @ (Self::ThreatAvoidance(_)
            | Self::Avoidance(_)
            | Self::CrowdAvoidance(_)
            | Self::WallAvoidance(_)) => Intention::Steer(SteerIntention::new(steer)),
        }
    }
}

/// Run every discovery procedure, in drain order.
///
/// Player orders are not discovered here; the brain adds them.
pub fn discover_all(ctx: &DecisionContext<'_>) -> Vec<Desire> {
    let mut found = goals::discover_mobbing(ctx);
    found.extend(goals::discover_migration(ctx));
    found.extend(goals::discover_barricading(ctx));
    found.extend(steering::discover_threat_avoidance(ctx));
    found.extend(steering::discover_avoidance(ctx));
    found.extend(steering::discover_crowd_avoidance(ctx));
    found.extend(steering::discover_wall_avoidance(ctx));
    found.extend(steering::discover_wander(ctx));
    found
}
