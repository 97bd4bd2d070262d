//! Bullets fired by the player and by ranged enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
    /// Impulse applied to the body it hits
    pub knockback: f32,
    pub owner: Side,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, damage: i32, knockback: f32, owner: Side) -> Self {
        Self {
            pos,
            vel,
            radius,
            damage,
            knockback,
            owner,
            alive: true,
        }
    }

    /// Straight-line advance
    #[inline]
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Number of sub-steps needed so one step never travels further than the
    /// projectile's diameter
    pub fn substeps(&self, dt: f32) -> u32 {
        let travel = self.vel.length() * dt;
        let step = (self.radius * 2.0).max(1.0);
        ((travel / step).ceil() as u32).clamp(1, MAX_SUBSTEPS)
    }
}

/// Upper bound on projectile sub-steps per tick
pub const MAX_SUBSTEPS: u32 = 64;
