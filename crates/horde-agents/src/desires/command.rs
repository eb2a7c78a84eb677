//! Externally issued movement orders.

use horde_types::Vec2;

/// A player's order to move to a point.
///
/// Orders are never discovered from beliefs; the agent's brain queues them
/// when issued. Their pull grows with age so a standing order keeps
/// outbidding goals the agent picks up on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMovement {
    /// Monotonic order number within one brain; later orders are larger.
    pub order: u64,
    /// Where to go.
    pub destination: Vec2,
    /// Simulation time at which the order was issued.
    pub issued_at: f64,
    /// Utility at issue time.
    pub base_utility: f32,
    /// Utility gained per second since issue.
    pub growth: f32,
}

impl PlayerMovement {
    /// Utility at time `now`. Times before issue count as zero age.
    pub fn utility(&self, now: f64) -> f32 {
        let age = crate::context::secs_f32((now - self.issued_at).max(0.0));
        self.growth.mul_add(age, self.base_utility)
    }

    /// Whether this order was issued after `other`.
    pub const fn supersedes(&self, other: &Self) -> bool {
        self.order > other.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utility_grows_with_age() {
        let order = PlayerMovement {
            order: 1,
            destination: Vec2::new(3.0, 4.0),
            issued_at: 10.0,
            base_utility: 10.0,
            growth: 0.5,
        };
        assert!((order.utility(10.0) - 10.0).abs() < 1e-5);
        assert!((order.utility(14.0) - 12.0).abs() < 1e-5);
        // Clock skew never lowers the pull.
        assert!((order.utility(5.0) - 10.0).abs() < 1e-5);
    }
}
