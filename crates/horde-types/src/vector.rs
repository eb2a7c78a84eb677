//! Planar vector used for positions, headings, and steering contributions.
//!
//! Movement requests encode both heading and urgency in a single vector:
//! direction is where the agent wants to go, magnitude is how badly. The
//! engine never normalizes a summed movement; scaling is the job of each
//! intention that produces one.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length.
    pub fn length_squared(self) -> f32 {
        self.x.mul_add(self.x, self.y * self.y)
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    /// Distance to another point.
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for a degenerate vector.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON && len.is_finite() {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Whether both components are (numerically) zero.
    pub fn is_zero(self) -> bool {
        self.length_squared() <= f32::EPSILON * f32::EPSILON
    }

    /// Build a unit vector from an angle in radians.
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl core::iter::Sum for Vec2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Axis-aligned rectangle, used for block bounds and wall segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Bounds {
    /// Create bounds from two corners, ordering the components.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Centre point.
    pub const fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Whether a point lies inside (edges inclusive).
    pub const fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Grow the bounds by `margin` on every side.
    pub const fn expanded(&self, margin: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x - margin, self.min.y - margin),
            max: Vec2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Closest point on the boundary edge to `point`.
    ///
    /// For a point inside, this is the projection onto the nearest edge; for
    /// a point outside, the clamped point.
    pub fn nearest_edge_point(&self, point: Vec2) -> Vec2 {
        if !self.contains(point) {
            return Vec2::new(
                point.x.clamp(self.min.x, self.max.x),
                point.y.clamp(self.min.y, self.max.y),
            );
        }
        [
            (point.x - self.min.x, Vec2::new(self.min.x, point.y)),
            (self.max.x - point.x, Vec2::new(self.max.x, point.y)),
            (point.y - self.min.y, Vec2::new(point.x, self.min.y)),
            (self.max.y - point.y, Vec2::new(point.x, self.max.y)),
        ]
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map_or(point, |(_, edge)| edge)
    }

    /// Whether the segment `from -> to` crosses this rectangle.
    ///
    /// Slab test against the rectangle grown by `extent`, so a body of that
    /// half-width sweeping along the segment is treated as colliding.
    pub fn intersects_segment(&self, from: Vec2, to: Vec2, extent: f32) -> bool {
        let grown = self.expanded(extent.max(0.0));
        let delta = to - from;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        for (origin, dir, lo, hi) in [
            (from.x, delta.x, grown.min.x, grown.max.x),
            (from.y, delta.y, grown.min.y, grown.max.y),
        ] {
            if dir.abs() <= f32::EPSILON {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let (near, far) = {
                let a = (lo - origin) * inv;
                let b = (hi - origin) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}
