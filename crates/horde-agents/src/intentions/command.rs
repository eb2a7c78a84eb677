//! Carrying out a player's movement order.

use horde_types::Action;

use crate::context::DecisionContext;
use crate::desires::PlayerMovement;
use crate::intentions::route::RouteGuard;

/// Follows a route to the ordered destination.
#[derive(Debug)]
pub struct CommandIntention {
    desire: PlayerMovement,
    route: RouteGuard,
}

impl CommandIntention {
    /// Open a route to the ordered destination.
    pub fn new(desire: PlayerMovement, ctx: &DecisionContext<'_>) -> Self {
        tracing::debug!(agent = %ctx.agent, order = desire.order, "Accepting player order");
        let route = RouteGuard::open(ctx, desire.destination);
        Self { desire, route }
    }

    /// The bound order.
    pub const fn desire(&self) -> PlayerMovement {
        self.desire
    }

    /// Accept this tick's copy of the same order.
    pub const fn rebind(&mut self, desire: PlayerMovement) {
        if desire.order == self.desire.order {
            self.desire = desire;
        }
    }

    /// Done once the route is walked or cannot be walked.
    pub fn should_abandon(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.position()
            .is_none_or(|from| !self.route.has_route() || self.route.has_ended(from))
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
        vec![Action::movement(heading * ctx.config.player_strength)]
    }

    /// Return the route.
    pub fn release(&mut self) {
        self.route.release();
    }
}
