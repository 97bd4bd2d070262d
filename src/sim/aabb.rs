//! Axis-aligned wall colliders
//!
//! Walls are stored as center + half extents. All arena geometry is built
//! from these; nothing rotates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    /// Half width / half height
    pub half: Vec2,
}

impl Aabb {
    /// Build from a center point and full width/height
    pub fn from_center_size(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(cx, cy),
            half: Vec2::new(w / 2.0, h / 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point on or inside the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}
