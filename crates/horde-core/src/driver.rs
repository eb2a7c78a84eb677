//! The seam between the decision loop and a world that moves.
//!
//! The decision pipeline only ever reads the world. Something else has to
//! apply the committed motor commands and advance time; [`WorldDriver`] is
//! that something. [`GridDriver`] drives the in-memory [`GridWorld`].

use std::collections::BTreeMap;

use horde_types::{EntityClass, EntityId, MotorCommand};
use horde_world::{GridWorld, IntegrationSettings, WorldError, WorldView};
use tracing::debug;

/// What applying one tick of commands did to the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Agents that actually moved.
    pub moved: u32,
    /// Attacks that landed.
    pub hits: u32,
    /// Survivors that turned.
    pub turned: u32,
    /// Barricade units placed.
    pub barricaded: u32,
}

/// A world the runner can read from and step forward.
pub trait WorldDriver: Send {
    /// The read-only view handed to the decision pipeline.
    fn view(&self) -> &dyn WorldView;

    /// Current simulation time in seconds.
    fn time(&self) -> f64;

    /// Agents that should have a brain, in any order.
    fn agents(&self) -> Vec<EntityId>;

    /// Apply committed commands and advance time by `dt` seconds.
    fn step(
        &mut self,
        commands: &BTreeMap<EntityId, MotorCommand>,
        dt: f64,
    ) -> Result<StepReport, WorldError>;
}

/// Drives a [`GridWorld`] with its built-in integrator.
#[derive(Debug)]
pub struct GridDriver {
    world: GridWorld,
    settings: IntegrationSettings,
}

impl GridDriver {
    /// Wrap a world.
    pub const fn new(world: GridWorld, settings: IntegrationSettings) -> Self {
        Self { world, settings }
    }

    /// The driven world.
    pub const fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Mutable access to the driven world.
    pub const fn world_mut(&mut self) -> &mut GridWorld {
        &mut self.world
    }

    /// Unwrap the world.
    pub fn into_world(self) -> GridWorld {
        self.world
    }
}

impl WorldDriver for GridDriver {
    fn view(&self) -> &dyn WorldView {
        &self.world
    }

    fn time(&self) -> f64 {
        self.world.time()
    }

    fn agents(&self) -> Vec<EntityId> {
        let mut agents = self.world.living(EntityClass::Survivor);
        agents.extend(self.world.living(EntityClass::Zombie));
        agents
    }

    fn step(
        &mut self,
        commands: &BTreeMap<EntityId, MotorCommand>,
        dt: f64,
    ) -> Result<StepReport, WorldError> {
        #[allow(clippy::cast_possible_truncation)]
        let dt_f32 = dt as f32;
        let mut report = StepReport::default();
        for (agent, command) in commands {
            let effects = self
                .world
                .apply_command(*agent, command, dt_f32, &self.settings)?;
            if effects.moved > 0.0 {
                report.moved = report.moved.saturating_add(1);
            }
            if effects.hit.is_some() {
                report.hits = report.hits.saturating_add(1);
            }
            if effects.turned {
                debug!(attacker = %agent, victim = ?effects.hit, "Survivor turned");
                report.turned = report.turned.saturating_add(1);
            }
            if effects.barricaded.is_some() {
                report.barricaded = report.barricaded.saturating_add(1);
            }
        }
        self.world.advance(dt);
        Ok(report)
    }
}
