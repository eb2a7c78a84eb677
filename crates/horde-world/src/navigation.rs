//! Straight-line navigation for the reference world.
//!
//! Real route computation is out of scope; a [`StraightRoute`] simply
//! heads for its destination. What matters here is the handle lifecycle:
//! every route opened is recorded in a shared [`RouteLedger`], and every
//! release is counted, so callers can verify that routes are released
//! exactly once and never leaked.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horde_types::{EntityId, Vec2};

use crate::query::NavigationHandle;

/// Counters for routes opened and released.
#[derive(Debug, Default)]
pub struct RouteLedger {
    opened: AtomicU64,
    released: AtomicU64,
}

impl RouteLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            opened: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    /// Total routes handed out.
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    /// Total release calls received.
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Routes handed out and not yet released.
    pub fn live(&self) -> u64 {
        self.opened().saturating_sub(self.released())
    }

    fn record_open(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn record_release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// A route that heads straight for its destination.
///
/// Every call to [`release`](NavigationHandle::release) is recorded, so a
/// double release shows up in the ledger instead of being silently ignored.
#[derive(Debug)]
pub struct StraightRoute {
    agent: EntityId,
    destination: Vec2,
    arrival_radius: f32,
    reachable: bool,
    ledger: Arc<RouteLedger>,
}

impl StraightRoute {
    /// Open a route and record it in `ledger`.
    pub fn open(
        agent: EntityId,
        destination: Vec2,
        arrival_radius: f32,
        reachable: bool,
        ledger: Arc<RouteLedger>,
    ) -> Self {
        ledger.record_open();
        tracing::trace!(agent = %agent, x = destination.x, y = destination.y, reachable, "Route opened");
        Self {
            agent,
            destination,
            arrival_radius,
            reachable,
            ledger,
        }
    }

    /// The route's destination.
    pub const fn destination(&self) -> Vec2 {
        self.destination
    }
}

impl NavigationHandle for StraightRoute {
    fn has_route(&self) -> bool {
        self.reachable
    }

    fn has_ended(&self, from: Vec2) -> bool {
        from.distance_squared(self.destination) <= self.arrival_radius * self.arrival_radius
    }

    fn direction(&self, from: Vec2) -> Vec2 {
        if !self.reachable {
            return Vec2::ZERO;
        }
        (self.destination - from).normalize_or_zero()
    }

    fn release(&mut self) {
        self.ledger.record_release();
        tracing::trace!(agent = %self.agent, "Route released");
    }
}
