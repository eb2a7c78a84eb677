//! Intentions that turn steering desires into movement.

use horde_types::{Action, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::context::DecisionContext;
use crate::desires::{Desire, Wander};

/// Pursues one of the reactive steering desires.
///
/// Steering never gives up on its own; it lives exactly as long as its
/// kind keeps being discovered.
#[derive(Debug, Clone, PartialEq)]
pub struct SteerIntention {
    desire: Desire,
}

impl SteerIntention {
    /// Bind to a steering desire.
    pub const fn new(desire: Desire) -> Self {
        Self { desire }
    }

    /// The bound desire.
    pub const fn desire(&self) -> &Desire {
        &self.desire
    }

    /// Accept this tick's surviving desire of the same kind.
    pub fn rebind(&mut self, desire: Desire) {
        if desire.kind() == self.desire.kind() {
            self.desire = desire;
        }
    }

    /// The steering vector for this tick.
    pub fn steering(&self, ctx: &DecisionContext<'_>) -> Vec2 {
        match &self.desire {
            Desire::Avoidance(a) => a.vector,
            Desire::CrowdAvoidance(c) => c.vector,
            Desire::WallAvoidance(w) => w.vector,
            Desire::ThreatAvoidance(t) => ctx
                .position()
                .map_or(Vec2::ZERO, |from| t.flee_vector(from, ctx.config.threat_strength)),
            Desire::PlayerMovement(_)
            | Desire::Mobbing(_)
            | Desire::Migration(_)
            | Desire::Barricading(_)
            | Desire::Wander(_) => Vec2::ZERO,
        }
    }

    /// One movement action, or none for a zero push.
    pub fn actions(&self, ctx: &DecisionContext<'_>) -> Vec<Action> {
        let vector = self.steering(ctx);
        if vector.is_zero() {
            Vec::new()
        } else {
            vec![Action::movement(vector)]
        }
    }
}

/// A random walk with a slowly drifting heading.
#[derive(Debug, Clone)]
pub struct WanderIntention {
    desire: Wander,
    heading: f32,
    rng: SmallRng,
}

impl WanderIntention {
    /// Start wandering in a random direction drawn from `seed`.
    pub fn new(desire: Wander, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let heading = rng.random_range(0.0..core::f32::consts::TAU);
        Self {
            desire,
            heading,
            rng,
        }
    }

    /// The bound desire.
    pub const fn desire(&self) -> Wander {
        self.desire
    }

    /// Current heading in radians.
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Accept this tick's wander desire.
    pub const fn rebind(&mut self, desire: Wander) {
        self.desire = desire;
    }

    /// Jitter the heading and walk along it.
    pub fn actions(&mut self, ctx: &DecisionContext<'_>) -> Vec<Action> {
        let jitter = ctx.config.wander_jitter;
        if jitter > 0.0 {
            self.heading = (self.heading + self.rng.random_range(-jitter..=jitter))
                .rem_euclid(core::f32::consts::TAU);
        }
        vec![Action::movement(
            Vec2::from_angle(self.heading) * self.desire.strength,
        )]
    }
}
