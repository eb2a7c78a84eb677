//! World-query interfaces and the in-memory reference world.
//!
//! The behavior engine consumes the world only through the traits in
//! [`query`]. This crate defines those contracts and ships [`GridWorld`],
//! a small deterministic implementation used by tests and the demo engine.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world construction and mutation.
//! - [`grid`] -- [`GridWorld`]: blocks, walls, entities, sightings, and a
//!   minimal command integrator.
//! - [`navigation`] -- Straight-line routes and the [`RouteLedger`] that
//!   counts route opens and releases.
//! - [`query`] -- Perception, line-of-sight, topology, navigation, and
//!   vitals traits, bundled as [`WorldView`].

pub mod error;
pub mod grid;
pub mod navigation;
pub mod query;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::{CommandEffects, GridWorld, IntegrationSettings};
pub use navigation::{RouteLedger, StraightRoute};
pub use query::{
    BlockGeometry, BlockTopology, LineOfSight, NavigationHandle, Navigator, PerceptionQuery,
    Vitals, VitalsQuery, WorldView,
};
