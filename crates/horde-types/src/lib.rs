//! Shared type definitions for the Horde behavior engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the world-query layer, the decision pipeline, and the simulation driver.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entities and blocks
//! - [`enums`] -- Entity classes and desire kinds
//! - [`vector`] -- Planar vectors and axis-aligned bounds
//! - [`beliefs`] -- Per-tick belief records (self, entities, blocks)
//! - [`actions`] -- Intention outputs and the consolidated motor command

pub mod actions;
pub mod beliefs;
pub mod enums;
pub mod ids;
pub mod vector;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, MotorCommand};
pub use beliefs::{BlockBeliefs, EntityBeliefs, SelfBeliefs};
pub use enums::{DesireKind, EntityClass};
pub use ids::{BlockId, EntityId};
pub use vector::{Bounds, Vec2};
