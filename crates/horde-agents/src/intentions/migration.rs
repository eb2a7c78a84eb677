//! Relocating to another block.

use horde_types::{Action, EntityClass};

use crate::context::DecisionContext;
use crate::desires::Migration;
use crate::intentions::route::RouteGuard;

/// Follows a route to the centre of the destination block.
#[derive(Debug)]
pub struct MigrateIntention {
    desire: Migration,
    route: RouteGuard,
}

impl MigrateIntention {
    /// Open a route towards the destination centre.
    pub fn new(desire: Migration, ctx: &DecisionContext<'_>) -> Self {
        tracing::debug!(
            agent = %ctx.agent,
            destination = %desire.destination,
            "Opening migration route"
        );
        let route = RouteGuard::open(ctx, desire.target);
        Self { desire, route }
    }

    /// The bound desire.
    pub const fn desire(&self) -> Migration {
        self.desire
    }

    /// Accept this tick's surviving migration to the same destination.
    pub fn rebind(&mut self, desire: Migration) {
        if desire.destination == self.desire.destination {
            self.desire = desire;
        }
    }

    /// Give up once there is no route, the route is walked, or the agent
    /// already stands in the destination. A survivor that turned gives up
    /// too.
    pub fn should_abandon(&self, ctx: &DecisionContext<'_>) -> bool {
        let Some(me) = ctx.beliefs.me else {
            return true;
        };
        me.class != EntityClass::Survivor
            || !self.route.has_route()
            || self.route.has_ended(me.position)
            || me.block == Some(self.desire.destination)
    }

    /// Follow the route.
    pub fn actions(&self, ctx: &DecisionContext<'_>) -> Vec<Action> {
        let Some(from) = ctx.position() else {
            return Vec::new();
        };
        let heading = self.route.direction(from);
        if heading.is_zero() {
            return Vec::new();
        }
        vec![Action::movement(heading * ctx.config.migration_strength)]
    }

    /// Return the route.
    pub fn release(&mut self) {
        self.route.release();
    }

    /// Whether the route has been returned.
    pub const fn is_released(&self) -> bool {
        self.route.is_released()
    }
}
