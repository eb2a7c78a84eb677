//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entities and blocks carry strongly-typed IDs so the decision pipeline
//! cannot confuse a perceived entity with the district it stands in. All
//! IDs use UUID v7 (time-ordered), which also gives the deterministic
//! `Ord` used to iterate agents and beliefs in a stable order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Fold the identifier into a 64-bit value, used to seed
            /// per-entity random streams.
            pub fn seed_bits(self) -> u64 {
                let (high, low) = self.0.as_u64_pair();
                high ^ low
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for any entity the engine can perceive: humans
    /// (survivors and zombies) and resource piles or sources.
    EntityId
}

define_id! {
    /// Unique identifier for a spatial block (city district).
    BlockId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let entity = EntityId::new();
        let block = BlockId::new();
        assert_ne!(entity.into_inner(), Uuid::nil());
        assert_ne!(block.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = EntityId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn seed_bits_are_stable() {
        let id = EntityId::from(Uuid::from_u64_pair(0xF0, 0x0F));
        assert_eq!(id.seed_bits(), 0xFF);
        assert_eq!(id.seed_bits(), id.seed_bits());
    }
}
