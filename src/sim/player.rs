//! The player body: intent-driven movement and shooting

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::move_with_walls;
use super::projectile::{Projectile, Side};
use crate::direction_to;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: i32,
    /// Hp at the start of the run, reported in results
    pub hp_start: i32,
    pub mass: f32,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot_timer: f32,
    pub shoot_cooldown: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            hp: tuning.player_hp,
            hp_start: tuning.player_hp,
            mass: tuning.player_mass,
            up: false,
            down: false,
            left: false,
            right: false,
            shoot_timer: 0.0,
            shoot_cooldown: tuning.player_shoot_cooldown,
        }
    }

    pub fn set_intent(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.up = up;
        self.down = down;
        self.left = left;
        self.right = right;
    }

    /// Unit movement direction from the intent flags; +y is up
    pub fn move_direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up)).normalize_or_zero()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn update(&mut self, dt: f32, arena: &Arena) {
        let delta = self.move_direction() * self.speed * dt;
        self.pos = move_with_walls(self.pos, delta, self.radius, &arena.walls);
        self.pos = arena.clamp_inside(self.pos, self.radius);
        self.shoot_timer = (self.shoot_timer - dt).max(0.0);
    }

    /// Fire toward `target` unless cooling down or aiming at itself
    pub fn shoot_towards(&mut self, target: Vec2, tuning: &Tuning) -> Option<Projectile> {
        if self.shoot_timer > 0.0 {
            return None;
        }
        let dir = direction_to(self.pos, target);
        if dir == Vec2::ZERO {
            return None;
        }

        self.shoot_timer = self.shoot_cooldown;
        Some(Projectile::new(
            self.pos,
            dir * tuning.bullet_speed,
            tuning.bullet_radius,
            tuning.bullet_damage,
            tuning.bullet_knockback,
            Side::Player,
        ))
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }
}
