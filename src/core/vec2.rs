//! Fixed-Point 2D Vector
//!
//! Deterministic 2D vector for playfield coordinates.
//! Origin is the top-left corner of the playfield; +y points down, so
//! falling entities have positive y velocity.

use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};

use super::fixed::{
    Fixed, FIXED_ONE, FIXED_SCALE,
    fixed_mul, fixed_clamp,
    PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT,
};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer pixel components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x << FIXED_SCALE,
            y: y << FIXED_SCALE,
        }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Scale by a fixed-point scalar.
    #[inline]
    pub fn scale(self, scalar: Fixed) -> Self {
        Self {
            x: fixed_mul(self.x, scalar),
            y: fixed_mul(self.y, scalar),
        }
    }

    /// Squared distance to another point, widened to i64 (Q32.32).
    ///
    /// Pixel-scale deltas overflow the Q16.16 product range, so the squared
    /// distance is kept as the raw i64 product sum. Compare against a radius
    /// squared into the same scale (`r as i64 * r as i64`), or feed it to
    /// `fixed_sqrt_wide` to recover a Q16.16 distance.
    #[inline]
    pub fn distance_squared_wide(self, other: Self) -> i64 {
        let dx = self.x.wrapping_sub(other.x) as i64;
        let dy = self.y.wrapping_sub(other.y) as i64;
        dx * dx + dy * dy
    }

    /// Clamp the position into the playfield rectangle.
    #[inline]
    pub fn clamp_to_playfield(self) -> Self {
        Self {
            x: fixed_clamp(self.x, 0, PLAYFIELD_WIDTH),
            y: fixed_clamp(self.y, 0, PLAYFIELD_HEIGHT),
        }
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (
            self.x as f32 / FIXED_ONE as f32,
            self.y as f32 / FIXED_ONE as f32,
        )
    }
}

// Operator overloads for ergonomics
impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add(rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_vec2_add() {
        let a = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        let b = FixedVec2::new(to_fixed(1.0), to_fixed(2.0));
        let result = a + b;
        assert_eq!(result.x, to_fixed(4.0));
        assert_eq!(result.y, to_fixed(6.0));
    }

    #[test]
    fn test_vec2_sub() {
        let a = FixedVec2::new(to_fixed(5.0), to_fixed(7.0));
        let b = FixedVec2::new(to_fixed(2.0), to_fixed(3.0));
        let result = a - b;
        assert_eq!(result.x, to_fixed(3.0));
        assert_eq!(result.y, to_fixed(4.0));
    }

    #[test]
    fn test_vec2_scale() {
        let v = FixedVec2::new(to_fixed(2.0), to_fixed(3.0));
        let result = v.scale(to_fixed(2.0));
        assert_eq!(result.x, to_fixed(4.0));
        assert_eq!(result.y, to_fixed(6.0));
    }

    #[test]
    fn test_vec2_distance_squared_wide() {
        // 3-4-5 triangle at pixel scale: 300, 400 -> 500
        let a = FixedVec2::from_ints(0, 0);
        let b = FixedVec2::from_ints(300, 400);
        let dist_sq = a.distance_squared_wide(b);

        let expected = to_fixed(500.0) as i64;
        assert_eq!(dist_sq, expected * expected);
    }

    #[test]
    fn test_vec2_clamp_to_playfield() {
        // Inside bounds - unchanged
        let inside = FixedVec2::from_ints(100, 200);
        assert_eq!(inside.clamp_to_playfield(), inside);

        // Outside bounds - clamped
        let outside = FixedVec2::from_ints(2000, -100);
        let clamped = outside.clamp_to_playfield();
        assert_eq!(clamped.x, PLAYFIELD_WIDTH);
        assert_eq!(clamped.y, 0);
    }

    #[test]
    fn test_vec2_determinism() {
        let a = FixedVec2::new(12345678, 7654321);
        let b = FixedVec2::new(11111111, 22222222);

        for _ in 0..1000 {
            let add1 = a + b;
            let add2 = a + b;
            assert_eq!(add1, add2);

            let d1 = a.distance_squared_wide(b);
            let d2 = a.distance_squared_wide(b);
            assert_eq!(d1, d2);
        }
    }
}
