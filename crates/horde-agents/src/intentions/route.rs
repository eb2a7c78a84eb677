//! Exclusive ownership of a navigation handle.

use horde_types::Vec2;
use horde_world::NavigationHandle;

use crate::context::DecisionContext;

/// Owns one navigation handle and releases it exactly once.
///
/// [`release`](Self::release) empties the guard, so a second call is a
/// no-op. Dropping a guard that still holds its handle releases it, which
/// covers intentions torn down along with their agent.
#[derive(Debug)]
pub struct RouteGuard {
    handle: Option<Box<dyn NavigationHandle>>,
}

impl RouteGuard {
    /// Take ownership of a handle.
    pub const fn new(handle: Box<dyn NavigationHandle>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Ask the navigator for a route from the deciding agent to `destination`.
    pub fn open(ctx: &DecisionContext<'_>, destination: Vec2) -> Self {
        Self::new(ctx.world.navigate(ctx.agent, destination))
    }

    /// Whether the handle has already been returned.
    pub const fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    /// Whether a route exists. A released guard has none.
    pub fn has_route(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.has_route())
    }

    /// Whether an agent at `from` has arrived. A released guard has always ended.
    pub fn has_ended(&self, from: Vec2) -> bool {
        self.handle.as_ref().is_none_or(|h| h.has_ended(from))
    }

    /// Heading to follow from `from`; zero once released.
    pub fn direction(&self, from: Vec2) -> Vec2 {
        self.handle
            .as_ref()
            .map_or(Vec2::ZERO, |h| h.direction(from))
    }

    /// Return the handle to the navigator. Idempotent.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
        }
    }
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use horde_types::EntityId;
    use horde_world::{RouteLedger, StraightRoute};

    use super::*;

    fn guard(ledger: &Arc<RouteLedger>) -> RouteGuard {
        RouteGuard::new(Box::new(StraightRoute::open(
            EntityId::new(),
            Vec2::new(10.0, 0.0),
            1.0,
            true,
            Arc::clone(ledger),
        )))
    }

    #[test]
    fn release_is_idempotent() {
        let ledger = Arc::new(RouteLedger::new());
        let mut route = guard(&ledger);
        route.release();
        route.release();
        drop(route);
        assert_eq!(ledger.opened(), 1);
        assert_eq!(ledger.released(), 1);
    }

    #[test]
    fn drop_releases_unreleased_handle() {
        let ledger = Arc::new(RouteLedger::new());
        {
            let route = guard(&ledger);
            assert!(route.has_route());
            assert_eq!(ledger.live(), 1);
        }
        assert_eq!(ledger.released(), 1);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn released_guard_reports_ended() {
        let ledger = Arc::new(RouteLedger::new());
        let mut route = guard(&ledger);
        assert!(!route.has_ended(Vec2::ZERO));
        route.release();
        assert!(route.is_released());
        assert!(route.has_ended(Vec2::ZERO));
        assert!(route.direction(Vec2::ZERO).is_zero());
    }
}
