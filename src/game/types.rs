//! Shared 2D math types
//!
//! The runtime works in screen-space pixels with y growing downward.
//! Colors travel as packed 0xAARRGGBB words until they hit the draw target.

use serde::{Deserialize, Serialize};

/// A 2D point or direction in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Vec2::ZERO
    }
}

/// An axis-aligned rectangle given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds2D {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_center() {
        let b = Bounds2D::new(Vec2::new(50.0, 50.0), Vec2::new(150.0, 250.0));
        let c = b.center();
        assert!((c.x - 100.0).abs() < 0.001);
        assert!((c.y - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds2D::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert!(b.contains(Vec2::new(50.0, 50.0)));
        assert!(b.contains(Vec2::new(0.0, 100.0)));
        assert!(!b.contains(Vec2::new(100.1, 50.0)));
    }
}
