//! Screen-space geometry
//!
//! `Vec2` is a plain pixel/velocity pair. `NormalizedPoint` is a fractional
//! screen position that can never leave the unit square.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Two-component vector (pixels, velocities, stick deflection)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Component-wise product
    pub fn mul_components(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Fractional screen position, both axes in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    x: f32,
    y: f32,
}

impl NormalizedPoint {
    pub const CENTER: NormalizedPoint = NormalizedPoint { x: 0.5, y: 0.5 };

    /// Create a point, clamping each axis into [0, 1] (NaN reads as 0)
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Move by `delta` and clamp back into the unit square.
    /// A non-finite delta leaves the point where it was.
    pub fn translate(self, delta: Vec2) -> Self {
        if !delta.is_finite() {
            return self;
        }
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    /// Absolute pixel position inside a viewport of the given size
    pub fn to_pixels(self, viewport: Vec2) -> Vec2 {
        Vec2::new(self.x * viewport.x, self.y * viewport.y)
    }
}

impl Default for NormalizedPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_out_of_range() {
        let p = NormalizedPoint::new(-3.0, 7.5);
        assert_eq!(p.x(), 0.0);
        assert_eq!(p.y(), 1.0);
    }

    #[test]
    fn test_translate_clamps_at_edges() {
        let p = NormalizedPoint::new(0.95, 0.05).translate(Vec2::new(0.2, -0.2));
        assert_eq!(p, NormalizedPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_translate_ignores_non_finite_delta() {
        let p = NormalizedPoint::CENTER;
        assert_eq!(p.translate(Vec2::new(f32::INFINITY, 0.1)), p);
        assert_eq!(p.translate(Vec2::new(0.1, f32::NAN)), p);
    }

    #[test]
    fn test_to_pixels() {
        let p = NormalizedPoint::new(0.25, 0.5);
        assert_eq!(p.to_pixels(Vec2::new(800.0, 600.0)), Vec2::new(200.0, 300.0));
    }
}
