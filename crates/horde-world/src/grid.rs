//! In-memory reference world.
//!
//! [`GridWorld`] implements every query trait the decision pipeline
//! consumes. Blocks are axis-aligned rectangles, walls are axis-aligned
//! boxes that block traces and footing, and routes are straight lines.
//! It also provides the minimal mutation surface the demo engine needs to
//! apply committed motor commands; a real deployment would plug in its own
//! integrator instead.
//!
//! Perception is stale-tolerant: every entity carries the position and
//! time at which it was last sighted. [`GridWorld::advance`] refreshes the
//! sighting of every entity that is not concealed, so a concealed entity
//! keeps being reported where it was last seen, with an ageing timestamp.

use std::collections::BTreeMap;
use std::sync::Arc;

use horde_types::{
    BlockId, Bounds, EntityBeliefs, EntityClass, EntityId, MotorCommand, SelfBeliefs, Vec2,
};

use serde::Deserialize;

use crate::error::WorldError;
use crate::navigation::{RouteLedger, StraightRoute};
use crate::query::{
    BlockGeometry, BlockTopology, LineOfSight, NavigationHandle, Navigator, PerceptionQuery,
    Vitals, VitalsQuery,
};

/// Default distance at which a straight route counts as finished.
pub const DEFAULT_ARRIVAL_RADIUS: f32 = 1.0;

/// Mutable state of one block.
#[derive(Debug, Clone)]
struct BlockState {
    bounds: Bounds,
    enclosed: bool,
    /// Barricade units placed so far.
    barricade_progress: u32,
}

/// Mutable state of one entity.
#[derive(Debug, Clone)]
struct EntityState {
    class: EntityClass,
    position: Vec2,
    health: f32,
    alive: bool,
    /// Units for a pile, minimum yield for a breakable source.
    resource_units: u32,
    seen_position: Vec2,
    seen_at: f64,
    concealed: bool,
}

/// Parameters for [`GridWorld::apply_command`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// Maximum distance an agent covers per second.
    pub max_speed: f32,
    /// Health removed by one attack.
    pub attack_damage: f32,
    /// Maximum distance at which an attack lands.
    pub attack_range: f32,
    /// Barricade units after which a block becomes enclosed.
    pub enclose_threshold: u32,
    /// Health a survivor rises with after being turned.
    pub turned_health: f32,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            max_speed: 1.5,
            attack_damage: 10.0,
            attack_range: 1.5,
            enclose_threshold: 12,
            turned_health: 60.0,
        }
    }
}

/// What happened when a command was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommandEffects {
    /// Distance actually moved.
    pub moved: f32,
    /// The entity hit by an attack, if it landed.
    pub hit: Option<EntityId>,
    /// Whether the hit turned a survivor into a zombie.
    pub turned: bool,
    /// The block a dropped item was placed in.
    pub barricaded: Option<BlockId>,
}

/// The in-memory reference world.
#[derive(Debug)]
pub struct GridWorld {
    blocks: BTreeMap<BlockId, BlockState>,
    walls: Vec<Bounds>,
    entities: BTreeMap<EntityId, EntityState>,
    time: f64,
    arrival_radius: f32,
    routes: Arc<RouteLedger>,
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWorld {
    /// Create an empty world at time zero.
    pub fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
            walls: Vec::new(),
            entities: BTreeMap::new(),
            time: 0.0,
            arrival_radius: DEFAULT_ARRIVAL_RADIUS,
            routes: Arc::new(RouteLedger::new()),
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Add a block covering `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DegenerateBounds`] if the bounds have no area.
    pub fn add_block(&mut self, bounds: Bounds) -> Result<BlockId, WorldError> {
        self.insert_block(BlockId::new(), bounds)
    }

    /// Add a block with a caller-chosen ID.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateBlock`] if the ID is taken, or
    /// [`WorldError::DegenerateBounds`] if the bounds have no area.
    pub fn insert_block(&mut self, id: BlockId, bounds: Bounds) -> Result<BlockId, WorldError> {
        let width = bounds.max.x - bounds.min.x;
        let height = bounds.max.y - bounds.min.y;
        if width <= 0.0 || height <= 0.0 {
            return Err(WorldError::DegenerateBounds { width, height });
        }
        if self.blocks.contains_key(&id) {
            return Err(WorldError::DuplicateBlock(id));
        }
        self.blocks.insert(
            id,
            BlockState {
                bounds,
                enclosed: false,
                barricade_progress: 0,
            },
        );
        Ok(id)
    }

    /// Add a wall that blocks traces and footing.
    pub fn add_wall(&mut self, bounds: Bounds) {
        self.walls.push(bounds);
    }

    /// Mark a block as enclosed (or open it again).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BlockNotFound`] if the block does not exist.
    pub fn set_enclosed(&mut self, block: BlockId, enclosed: bool) -> Result<(), WorldError> {
        let state = self
            .blocks
            .get_mut(&block)
            .ok_or(WorldError::BlockNotFound(block))?;
        state.enclosed = enclosed;
        Ok(())
    }

    /// Spawn a survivor or zombie.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotHuman`] if `class` is a resource class.
    pub fn spawn_human(
        &mut self,
        class: EntityClass,
        position: Vec2,
        health: f32,
    ) -> Result<EntityId, WorldError> {
        let id = EntityId::new();
        if !class.is_human() {
            return Err(WorldError::NotHuman(id));
        }
        let state = self.fresh_entity(class, position, health, 0);
        self.entities.insert(id, state);
        Ok(id)
    }

    /// Spawn a resource pile or breakable source carrying `units`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotResource`] if `class` is a human class.
    pub fn spawn_resource(
        &mut self,
        class: EntityClass,
        position: Vec2,
        units: u32,
    ) -> Result<EntityId, WorldError> {
        let id = EntityId::new();
        if !class.is_resource() {
            return Err(WorldError::NotResource(id));
        }
        let state = self.fresh_entity(class, position, 0.0, units);
        self.entities.insert(id, state);
        Ok(id)
    }

    fn fresh_entity(
        &self,
        class: EntityClass,
        position: Vec2,
        health: f32,
        resource_units: u32,
    ) -> EntityState {
        EntityState {
            class,
            position,
            health,
            alive: !class.is_human() || health > 0.0,
            resource_units,
            seen_position: position,
            seen_at: self.time,
            concealed: false,
        }
    }

    // -------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------

    /// Advance the clock by `dt` seconds and refresh every visible sighting.
    pub fn advance(&mut self, dt: f64) {
        self.time += dt.max(0.0);
        let now = self.time;
        for state in self.entities.values_mut() {
            if !state.concealed {
                state.seen_position = state.position;
                state.seen_at = now;
            }
        }
    }

    /// Current simulation time in seconds.
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Stop (or resume) refreshing an entity's sighting.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn set_concealed(&mut self, entity: EntityId, concealed: bool) -> Result<(), WorldError> {
        let state = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        state.concealed = concealed;
        Ok(())
    }

    /// Teleport an entity (its sighting refreshes on the next advance).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn set_position(&mut self, entity: EntityId, position: Vec2) -> Result<(), WorldError> {
        let state = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        state.position = position;
        Ok(())
    }

    /// Overwrite an entity's health; zero or less kills it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the entity does not exist.
    pub fn set_health(&mut self, entity: EntityId, health: f32) -> Result<(), WorldError> {
        let state = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        state.health = health;
        state.alive = health > 0.0;
        Ok(())
    }

    /// Remove an entity entirely.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.entities.remove(&entity).is_some()
    }

    /// Apply one committed command for `agent` over `dt` seconds.
    ///
    /// Movement is clamped to `max_speed` and refused if the destination is
    /// not navigable. An attack lands if the target is alive and within
    /// range; a survivor brought to zero health rises as a zombie. A drop
    /// consumes one unit from the closest resource in the agent's block and
    /// adds it to that block's barricade.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the agent does not exist.
    pub fn apply_command(
        &mut self,
        agent: EntityId,
        command: &MotorCommand,
        dt: f32,
        settings: &IntegrationSettings,
    ) -> Result<CommandEffects, WorldError> {
        let state = self
            .entities
            .get(&agent)
            .ok_or(WorldError::EntityNotFound(agent))?;
        if !state.alive {
            return Ok(CommandEffects::default());
        }
        let origin = state.position;
        let mut effects = CommandEffects::default();

        let step_budget = settings.max_speed * dt.max(0.0);
        let requested = command.movement.length();
        if requested > f32::EPSILON && step_budget > 0.0 {
            let step = command.movement.normalize_or_zero() * requested.min(step_budget);
            let target = origin + step;
            if self.is_navigable(target) {
                if let Some(state) = self.entities.get_mut(&agent) {
                    state.position = target;
                }
                effects.moved = step.length();
            }
        }

        if let Some(target) = command.attack {
            let position = self.entities.get(&agent).map_or(origin, |s| s.position);
            if let Some(victim) = self.entities.get_mut(&target) {
                let in_range = victim.position.distance_squared(position)
                    <= settings.attack_range * settings.attack_range;
                if victim.alive && victim.class.is_human() && in_range {
                    victim.health -= settings.attack_damage;
                    effects.hit = Some(target);
                    if victim.health <= 0.0 {
                        if victim.class == EntityClass::Survivor {
                            victim.class = EntityClass::Zombie;
                            victim.health = settings.turned_health;
                            effects.turned = true;
                        } else {
                            victim.alive = false;
                        }
                    }
                }
            }
        }

        if command.drop_item.is_some() {
            effects.barricaded = self.place_barricade(agent, settings.enclose_threshold);
        }

        Ok(effects)
    }

    fn place_barricade(&mut self, agent: EntityId, enclose_threshold: u32) -> Option<BlockId> {
        let position = self.entities.get(&agent)?.position;
        let block = self.block_at(position)?;
        let bounds = self.blocks.get(&block)?.bounds;
        let source = self
            .entities
            .iter()
            .filter(|(_, s)| s.class.is_resource() && s.resource_units > 0)
            .filter(|(_, s)| bounds.contains(s.position))
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance_squared(position)
                    .total_cmp(&b.position.distance_squared(position))
            })
            .map(|(id, _)| *id)?;
        if let Some(resource) = self.entities.get_mut(&source) {
            resource.resource_units = resource.resource_units.saturating_sub(1);
        }
        let state = self.blocks.get_mut(&block)?;
        state.barricade_progress = state.barricade_progress.saturating_add(1);
        if state.barricade_progress >= enclose_threshold {
            state.enclosed = true;
        }
        Some(block)
    }

    // -------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------

    /// The shared route ledger.
    pub fn route_ledger(&self) -> Arc<RouteLedger> {
        Arc::clone(&self.routes)
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// All block IDs in order.
    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.keys().copied().collect()
    }

    /// Current (not last-seen) position of an entity.
    pub fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.entities.get(&entity).map(|s| s.position)
    }

    /// Current class of an entity.
    pub fn class_of(&self, entity: EntityId) -> Option<EntityClass> {
        self.entities.get(&entity).map(|s| s.class)
    }

    /// IDs of living entities of a class, in order.
    pub fn living(&self, class: EntityClass) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, s)| s.class == class && s.alive)
            .map(|(id, _)| *id)
            .collect()
    }

    fn beliefs_for(&self, id: EntityId, state: &EntityState) -> EntityBeliefs {
        EntityBeliefs {
            id,
            class: state.class,
            position: state.seen_position,
            seen_at: state.seen_at,
            block: self.block_at(state.seen_position),
            resource_units: state.resource_units,
        }
    }
}

impl PerceptionQuery for GridWorld {
    fn locate(&self, agent: EntityId) -> Option<SelfBeliefs> {
        let state = self.entities.get(&agent)?;
        if !state.alive || !state.class.is_human() {
            return None;
        }
        if !state.position.x.is_finite() || !state.position.y.is_finite() {
            return None;
        }
        Some(SelfBeliefs {
            id: agent,
            class: state.class,
            position: state.position,
            block: self.block_at(state.position),
            health: state.health,
        })
    }

    fn perceive(&self, agent: EntityId, radius: f32) -> Vec<EntityBeliefs> {
        let Some(origin) = self.entities.get(&agent).map(|s| s.position) else {
            return Vec::new();
        };
        let radius_sq = radius * radius;
        self.entities
            .iter()
            .filter(|(id, s)| **id != agent && s.alive)
            .filter(|(_, s)| s.seen_position.distance_squared(origin) <= radius_sq)
            .map(|(id, s)| self.beliefs_for(*id, s))
            .collect()
    }

    fn census(&self, block: BlockId) -> Vec<EntityBeliefs> {
        let Some(bounds) = self.blocks.get(&block).map(|b| b.bounds) else {
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|(_, s)| s.alive && bounds.contains(s.seen_position))
            .map(|(id, s)| self.beliefs_for(*id, s))
            .collect()
    }
}

impl LineOfSight for GridWorld {
    fn is_obstructed(&self, from: Vec2, to: Vec2, extent: f32) -> bool {
        self.walls
            .iter()
            .any(|wall| wall.intersects_segment(from, to, extent))
    }
}

impl BlockTopology for GridWorld {
    fn block_at(&self, position: Vec2) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|(_, b)| b.bounds.contains(position))
            .map(|(id, _)| *id)
    }

    fn geometry(&self, block: BlockId) -> Option<BlockGeometry> {
        self.blocks.get(&block).map(|b| BlockGeometry {
            id: block,
            bounds: b.bounds,
            enclosed: b.enclosed,
        })
    }

    fn blocks_near(&self, position: Vec2, radius: f32) -> Vec<BlockId> {
        let radius_sq = radius * radius;
        self.blocks
            .iter()
            .filter(|(_, b)| b.bounds.center().distance_squared(position) <= radius_sq)
            .map(|(id, _)| *id)
            .collect()
    }

    fn is_navigable(&self, position: Vec2) -> bool {
        self.blocks.values().any(|b| b.bounds.contains(position))
            && !self.walls.iter().any(|w| w.contains(position))
    }
}

impl Navigator for GridWorld {
    fn navigate(&self, agent: EntityId, destination: Vec2) -> Box<dyn NavigationHandle> {
        let reachable = self.is_navigable(destination);
        Box::new(StraightRoute::open(
            agent,
            destination,
            self.arrival_radius,
            reachable,
            Arc::clone(&self.routes),
        ))
    }
}

impl VitalsQuery for GridWorld {
    fn vitals(&self, entity: EntityId) -> Option<Vitals> {
        let state = self.entities.get(&entity)?;
        if !state.class.is_human() {
            return None;
        }
        Some(Vitals {
            alive: state.alive,
            health: state.health,
        })
    }
}
