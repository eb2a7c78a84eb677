//! The intention catalog: persistent contexts that pursue desires.
//!
//! An [`Intention`] is spawned from a desire and then lives across ticks,
//! carrying whatever state its pursuit needs (a route, a wander heading, a
//! gather/place phase). Every tick the lifecycle manager asks it whether
//! to continue, hands it the surviving desire of its kind, and drains its
//! actions exactly once.
//!
//! # Modules
//!
//! - [`route`] -- [`RouteGuard`], exclusive owner of a navigation handle
//! - [`steering`] -- reactive steering and the ambient random walk
//! - [`migration`] -- relocating to another block
//! - [`barricade`] -- the gather/place fortification loop
//! - [`mobbing`] -- swarming and striking a hostile
//! - [`command`] -- carrying out player orders

pub mod barricade;
pub mod command;
pub mod migration;
pub mod mobbing;
pub mod route;
pub mod steering;

use horde_types::{Action, BlockId, DesireKind};

use crate::context::DecisionContext;
use crate::desires::{Desire, DesireKey};

pub use barricade::{BarricadeIntention, BarricadePhase};
pub use command::CommandIntention;
pub use migration::MigrateIntention;
pub use mobbing::MobIntention;
pub use route::RouteGuard;
pub use steering::{SteerIntention, WanderIntention};

/// A live pursuit of one desire.
#[derive(Debug)]
pub enum Intention {
    /// Following a player order.
    Command(CommandIntention),
    /// Swarming a hostile.
    Mob(MobIntention),
    /// Relocating.
    Migrate(MigrateIntention),
    /// Fortifying.
    Barricade(BarricadeIntention),
    /// Reactive steering.
    Steer(SteerIntention),
    /// Random walk.
    Wander(WanderIntention),
}

impl Intention {
    /// The desire currently backing this intention.
    pub fn desire(&self) -> Desire {
        match self {
            Self::Command(i) => Desire::PlayerMovement(i.desire()),
            Self::Mob(i) => Desire::Mobbing(i.desire()),
            Self::Migrate(i) => Desire::Migration(i.desire()),
            Self::Barricade(i) => Desire::Barricading(i.desire()),
            Self::Steer(i) => i.desire().clone(),
            Self::Wander(i) => Desire::Wander(i.desire()),
        }
    }

    /// The kind of the backing desire.
    pub fn kind(&self) -> DesireKind {
        self.key().kind
    }

    /// Identity of the backing desire.
    pub fn key(&self) -> DesireKey {
        match self {
            Self::Steer(i) => i.desire().key(),
            other => other.desire().key(),
        }
    }

    /// The backing desire, if its kind competes again next tick.
    pub fn carried_desire(&self) -> Option<Desire> {
        let desire = self.desire();
        desire.kind().is_persistent().then_some(desire)
    }

    /// The block this intention refers to, if any.
    ///
    /// The belief builder keeps these blocks in view even when they fall
    /// outside awareness range.
    pub fn block(&self) -> Option<BlockId> {
        match self {
            Self::Migrate(i) => Some(i.desire().destination),
            Self::Barricade(i) => Some(i.block()),
            Self::Command(_) | Self::Mob(_) | Self::Steer(_) | Self::Wander(_) => None,
        }
    }

    /// Accept the surviving desire of this intention's kind.
    ///
    /// A desire of another kind or subject is ignored.
    pub fn rebind(&mut self, desire: Desire) {
        match (self, desire) {
            (Self::Command(i), Desire::PlayerMovement(d)) => i.rebind(d),
            (Self::Mob(i), Desire::Mobbing(d)) => i.rebind(d),
            (Self::Migrate(i), Desire::Migration(d)) => i.rebind(d),
            (Self::Barricade(i), Desire::Barricading(d)) => i.rebind(d),
            (Self::Wander(i), Desire::Wander(d)) => i.rebind(d),
            (Self::Steer(i), d) => i.rebind(d),
            (other, d) => {
                tracing::trace!(intention = %other.kind(), desire = %d.kind(), "Ignoring mismatched rebind");
            }
        }
    }

    /// Whether the pursuit has become impossible or pointless.
    pub fn should_abandon(&self, ctx: &DecisionContext<'_>) -> bool {
        match self {
            Self::Command(i) => i.should_abandon(ctx),
            Self::Mob(i) => i.should_abandon(ctx),
            Self::Migrate(i) => i.should_abandon(ctx),
            Self::Barricade(i) => i.should_abandon(ctx),
            Self::Steer(_) | Self::Wander(_) => false,
        }
    }

    /// Whether the pursuit is still willing to continue.
    pub fn should_keep(&self, ctx: &DecisionContext<'_>) -> bool {
        match self {
            Self::Mob(i) => i.should_keep(ctx),
            Self::Command(_)
            | Self::Migrate(_)
            | Self::Barricade(_)
            | Self::Steer(_)
            | Self::Wander(_) => true,
        }
    }

    /// This tick's actions. Drain once.
    pub fn actions(&mut self, ctx: &DecisionContext<'_>) -> std::vec::IntoIter<Action> {
        let actions = match self {
            Self::Command(i) => i.actions(ctx),
            Self::Mob(i) => i.actions(ctx),
            Self::Migrate(i) => i.actions(ctx),
            Self::Barricade(i) => i.actions(ctx),
            Self::Steer(i) => i.actions(ctx),
            Self::Wander(i) => i.actions(ctx),
        };
        actions.into_iter()
    }

    /// Release owned resources. Safe to call more than once.
    pub fn release(&mut self) {
        match self {
            Self::Command(i) => i.release(),
            Self::Migrate(i) => i.release(),
            Self::Barricade(i) => i.release(),
            Self::Mob(_) | Self::Steer(_) | Self::Wander(_) => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use horde_types::{Bounds, EntityClass, Vec2};
    use horde_world::GridWorld;

    use super::*;
    use crate::beliefs::build_beliefs;
    use crate::config::BehaviorConfig;
    use crate::desires::{Migration, PlayerMovement, Wander};

    #[test]
    fn only_goal_intentions_carry_desires() {
        let mut world = GridWorld::new();
        let home = world
            .add_block(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)))
            .unwrap();
        let away = world
            .add_block(Bounds::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0)))
            .unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let wander = Desire::Wander(Wander { strength: 0.3 }).into_intention(&ctx);
        assert!(wander.carried_desire().is_none());
        assert_eq!(wander.block(), None);

        let migrate = Desire::Migration(Migration {
            destination: away,
            target: Vec2::new(15.0, 5.0),
            utility: 1.0,
            created_at: 0.0,
        })
        .into_intention(&ctx);
        assert_eq!(migrate.kind(), DesireKind::Migration);
        assert_eq!(migrate.block(), Some(away));
        assert!(migrate.carried_desire().is_some());
        assert_ne!(migrate.block(), Some(home));
    }

    #[test]
    fn release_through_enum_is_exactly_once() {
        let mut world = GridWorld::new();
        world
            .add_block(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0)))
            .unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let mut order = Desire::PlayerMovement(PlayerMovement {
            order: 1,
            destination: Vec2::new(15.0, 15.0),
            issued_at: 0.0,
            base_utility: 10.0,
            growth: 0.1,
        })
        .into_intention(&ctx);
        assert_eq!(order.actions(&ctx).count(), 1);
        order.release();
        order.release();
        drop(order);

        let ledger = world.route_ledger();
        assert_eq!(ledger.opened(), 1);
        assert_eq!(ledger.released(), 1);
    }

    #[test]
    fn mismatched_rebind_is_ignored() {
        let mut world = GridWorld::new();
        world
            .add_block(Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0)))
            .unwrap();
        let me = world
            .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
            .unwrap();
        let config = BehaviorConfig::default();
        let beliefs = build_beliefs(me, &world, &config, 0.0, &[]);
        let ctx = DecisionContext::new(me, &beliefs, &world, &config);

        let mut wander = Desire::Wander(Wander { strength: 0.3 }).into_intention(&ctx);
        wander.rebind(Desire::Wander(Wander { strength: 0.9 }));
        assert!((wander.desire().utility(0.0) - 0.9).abs() < f32::EPSILON);
        wander.rebind(Desire::Migration(Migration {
            destination: BlockId::new(),
            target: Vec2::ZERO,
            utility: 1.0,
            created_at: 0.0,
        }));
        assert_eq!(wander.kind(), DesireKind::Wander);
    }
}
