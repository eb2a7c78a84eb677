//! Fortifying the current block.
//!
//! A barricading agent alternates between two phases: walk to the nearest
//! material in the block and pick it up, then carry it to the nearest edge
//! of the block and drop it there. The world decides what a drop is worth;
//! the intention only asks for one.

use horde_types::{Action, BlockId, EntityClass, Vec2};

use crate::context::DecisionContext;
use crate::desires::Barricading;
use crate::intentions::route::RouteGuard;

/// Squared distance a phase target may drift before the route is re-planned.
const REPLAN_DRIFT_SQ: f32 = 0.01;

/// Where the barricading loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarricadePhase {
    /// Heading for material.
    Gather,
    /// Carrying material to the block edge.
    Place,
}

/// Gathers material and drops it along the edge of the block.
#[derive(Debug)]
pub struct BarricadeIntention {
    desire: Barricading,
    phase: BarricadePhase,
    route: Option<(RouteGuard, Vec2)>,
}

impl BarricadeIntention {
    /// Start in the gather phase.
    pub const fn new(desire: Barricading) -> Self {
        Self {
            desire,
            phase: BarricadePhase::Gather,
            route: None,
        }
    }

    /// The bound desire.
    pub const fn desire(&self) -> Barricading {
        self.desire
    }

    /// The block being fortified.
    pub const fn block(&self) -> BlockId {
        self.desire.block
    }

    /// Current phase.
    pub const fn phase(&self) -> BarricadePhase {
        self.phase
    }

    /// Accept this tick's surviving barricading desire for the same block.
    pub fn rebind(&mut self, desire: Barricading) {
        if desire.block == self.desire.block {
            self.desire = desire;
        }
    }

    /// Give up once the block is enclosed or drained, or the agent left it
    /// or turned.
    pub fn should_abandon(&self, ctx: &DecisionContext<'_>) -> bool {
        let Some(me) = ctx.beliefs.me else {
            return true;
        };
        let Some(block) = ctx.beliefs.block(self.desire.block) else {
            return true;
        };
        me.class != EntityClass::Survivor
            || block.enclosed
            || block.resource_count == 0
            || me.block != Some(block.id)
    }

    /// Advance the gather/place loop by one tick.
    pub fn actions(&mut self, ctx: &DecisionContext<'_>) -> Vec<Action> {
        let Some(from) = ctx.position() else {
            return Vec::new();
        };
        let Some(block) = ctx.beliefs.block(self.desire.block).copied() else {
            return Vec::new();
        };
        let reach_sq = ctx.config.interact_range * ctx.config.interact_range;

        match self.phase {
            BarricadePhase::Gather => {
                let Some(material) = ctx.beliefs.resources_in(block.id).next() else {
                    return Vec::new();
                };
                if material.position.distance_squared(from) <= reach_sq {
                    tracing::trace!(agent = %ctx.agent, material = %material.id, "Picked up material");
                    self.phase = BarricadePhase::Place;
                    self.drop_route();
                    return Vec::new();
                }
                self.steer_to(ctx, from, material.position)
            }
            BarricadePhase::Place => {
                let edge = block.bounds.nearest_edge_point(from);
                if edge.distance_squared(from) <= reach_sq {
                    self.phase = BarricadePhase::Gather;
                    self.drop_route();
                    return vec![Action::DropItem {
                        priority: ctx.config.drop_priority,
                    }];
                }
                self.steer_to(ctx, from, edge)
            }
        }
    }

    /// Return any live route.
    pub fn release(&mut self) {
        if let Some((route, _)) = self.route.as_mut() {
            route.release();
        }
    }

    fn drop_route(&mut self) {
        if let Some((mut route, _)) = self.route.take() {
            route.release();
        }
    }

    fn steer_to(&mut self, ctx: &DecisionContext<'_>, from: Vec2, target: Vec2) -> Vec<Action> {
        let stale = self
            .route
            .as_ref()
            .is_none_or(|(_, planned)| planned.distance_squared(target) > REPLAN_DRIFT_SQ);
        if stale {
            self.drop_route();
            self.route = Some((RouteGuard::open(ctx, target), target));
        }
        let heading = self
            .route
            .as_ref()
            .map_or(Vec2::ZERO, |(route, _)| route.direction(from));
        if heading.is_zero() {
            return Vec::new();
        }
        vec![Action::movement(heading * ctx.config.barricade_strength)]
    }
}
