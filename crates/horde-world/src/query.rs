//! Read-only world-query contracts consumed by the decision pipeline.
//!
//! The behavior engine never owns the world. Every fact it reasons about
//! arrives through one of these narrow traits: perception, line-of-sight
//! traces, block topology, navigation, and vitals. [`WorldView`] bundles
//! them so callers can pass a single `&dyn WorldView`.
//!
//! All traits require `Send + Sync`: agents are independent and may be
//! evaluated in parallel against the same world.

use core::fmt::Debug;

use horde_types::{BlockId, Bounds, EntityBeliefs, EntityId, SelfBeliefs, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry of one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    /// The block.
    pub id: BlockId,
    /// Block extent.
    pub bounds: Bounds,
    /// Whether every entrance has been barricaded.
    pub enclosed: bool,
}

/// Liveness and health of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Whether the entity is still alive (or, for zombies, still moving).
    pub alive: bool,
    /// Current numeric health.
    pub health: f32,
}

/// Perception: what an agent can currently sense.
pub trait PerceptionQuery: Send + Sync {
    /// The agent's own state, or `None` if it has no valid position.
    fn locate(&self, agent: EntityId) -> Option<SelfBeliefs>;

    /// Live entities within `radius` of the agent, excluding the agent itself,
    /// each tagged with the time and position of its last sighting.
    fn perceive(&self, agent: EntityId, radius: f32) -> Vec<EntityBeliefs>;

    /// Every live entity whose last sighting places it inside `block`.
    fn census(&self, block: BlockId) -> Vec<EntityBeliefs>;
}

/// Straight-line trace against static geometry.
pub trait LineOfSight: Send + Sync {
    /// Whether a body of half-width `extent` moving straight from `from` to
    /// `to` would hit static geometry.
    fn is_obstructed(&self, from: Vec2, to: Vec2, extent: f32) -> bool;
}

/// Spatial partition of the world into blocks.
pub trait BlockTopology: Send + Sync {
    /// The block owning a position.
    fn block_at(&self, position: Vec2) -> Option<BlockId>;

    /// Geometry of a block.
    fn geometry(&self, block: BlockId) -> Option<BlockGeometry>;

    /// Blocks whose centre lies within `radius` of `position`.
    fn blocks_near(&self, position: Vec2, radius: f32) -> Vec<BlockId>;

    /// Whether a position can be stood on.
    fn is_navigable(&self, position: Vec2) -> bool;
}

/// A live route held by one intention.
///
/// The holder must call [`release`](NavigationHandle::release) exactly once
/// when it no longer needs the route.
pub trait NavigationHandle: Send + Sync + Debug {
    /// Whether a route to the destination exists.
    fn has_route(&self) -> bool;

    /// Whether an agent at `from` has reached the end of the route.
    fn has_ended(&self, from: Vec2) -> bool;

    /// Unit heading an agent at `from` should follow.
    fn direction(&self, from: Vec2) -> Vec2;

    /// Return the route to the navigator.
    fn release(&mut self);
}

/// Route planning service.
pub trait Navigator: Send + Sync {
    /// Plan a route for `agent` towards `destination`.
    fn navigate(&self, agent: EntityId, destination: Vec2) -> Box<dyn NavigationHandle>;
}

/// Combat/health component access.
pub trait VitalsQuery: Send + Sync {
    /// Liveness and health of an entity, or `None` if it has no health.
    fn vitals(&self, entity: EntityId) -> Option<Vitals>;
}

/// Everything the decision pipeline may ask of the world.
pub trait WorldView: PerceptionQuery + LineOfSight + BlockTopology + Navigator + VitalsQuery {}

impl<T> WorldView for T where
    T: PerceptionQuery + LineOfSight + BlockTopology + Navigator + VitalsQuery
{
}
