//! Error types for the `horde-world` crate.
//!
//! Only world construction and direct mutation can fail. The read-only
//! query traits consumed by the decision pipeline are total and express
//! "nothing there" as `None` or an empty sequence.

use horde_types::{BlockId, EntityId};

/// Errors that can occur while building or mutating a [`GridWorld`].
///
/// [`GridWorld`]: crate::grid::GridWorld
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A block was not found in the world.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// An entity was not found in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A block with the same ID already exists.
    #[error("duplicate block id: {0}")]
    DuplicateBlock(BlockId),

    /// An entity with the same ID already exists.
    #[error("duplicate entity id: {0}")]
    DuplicateEntity(EntityId),

    /// The supplied bounds enclose no area.
    #[error("degenerate bounds: {width}x{height}")]
    DegenerateBounds {
        /// Width of the rejected bounds.
        width: f32,
        /// Height of the rejected bounds.
        height: f32,
    },

    /// The operation requires a human entity.
    #[error("entity {0} is not a survivor or zombie")]
    NotHuman(EntityId),

    /// The operation requires a resource entity.
    #[error("entity {0} is not a resource pile or source")]
    NotResource(EntityId),
}
