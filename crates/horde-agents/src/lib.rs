//! Beliefs, desires, and intentions for Horde agents.
//!
//! This crate holds everything one agent reasons with, but not the loop
//! that drives it. `horde-core` owns arbitration, the intention lifecycle,
//! and action aggregation; this crate supplies the pieces those stages
//! operate on.
//!
//! # Modules
//!
//! - [`beliefs`] -- Per-tick snapshots ([`Beliefs`], [`build_beliefs`])
//! - [`config`] -- Behaviour thresholds ([`BehaviorConfig`])
//! - [`context`] -- The read-only bundle passed to every decision step
//! - [`desires`] -- The desire catalog, conflict rules, and discovery
//! - [`intentions`] -- The intention catalog and [`RouteGuard`]

pub mod beliefs;
pub mod config;
pub mod context;
pub mod desires;
pub mod intentions;

pub use beliefs::{Beliefs, build_beliefs};
pub use config::BehaviorConfig;
pub use context::DecisionContext;
pub use desires::{Desire, DesireKey, Subject, discover_all};
pub use intentions::{Intention, RouteGuard};
