//! Enemy variants and their per-tick behavior

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::move_with_walls;
use super::projectile::{Projectile, Side};
use crate::direction_to;
use crate::level::EnemyStats;
use crate::tuning::Tuning;

/// Charger dash settings
pub const CHARGER_DASH_COOLDOWN: f32 = 2.5;
pub const CHARGER_DASH_DURATION: f32 = 0.4;
pub const CHARGER_DASH_MULTIPLIER: f32 = 3.0;
/// Chargers only start a dash when the player is this close
pub const CHARGER_ACTIVATION_RADIUS: f32 = 320.0;

/// Shooters back away when the player comes closer than this
pub const SHOOTER_RETREAT_DISTANCE: f32 = 140.0;

/// Fraction of knockback velocity left after one second
pub const KNOCKBACK_RETAIN_PER_SECOND: f32 = 0.02;

/// Closer than this, homing gives up instead of jittering around the target
const HOMING_DEADZONE: f32 = 1.0;

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Melee,
    Shooter,
    Charger,
    Tank,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Melee,
        EnemyKind::Shooter,
        EnemyKind::Charger,
        EnemyKind::Tank,
    ];

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Melee | EnemyKind::Shooter => 16.0,
            EnemyKind::Charger => 18.0,
            EnemyKind::Tank => 24.0,
        }
    }

    pub fn mass(self) -> f32 {
        match self {
            EnemyKind::Tank => 3.0,
            _ => 1.6,
        }
    }

    /// Multiplier applied to the level's base speed
    pub fn speed_multiplier(self) -> f32 {
        match self {
            EnemyKind::Tank => 0.7,
            _ => 1.0,
        }
    }

    /// Seconds between shots, `None` for variants that never shoot
    pub fn shoot_interval(self) -> Option<f32> {
        match self {
            EnemyKind::Shooter => Some(1.2),
            EnemyKind::Tank => Some(1.4),
            EnemyKind::Melee | EnemyKind::Charger => None,
        }
    }

    pub fn kill_score(self) -> u64 {
        match self {
            EnemyKind::Melee => 50,
            EnemyKind::Shooter => 70,
            EnemyKind::Charger => 80,
            EnemyKind::Tank => 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Effective base speed (level stat times variant multiplier)
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub mass: f32,
    /// Decaying velocity from hits
    pub knockback: Vec2,
    pub shoot_timer: f32,
    pub dash_cooldown: f32,
    pub dash_timer: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, stats: EnemyStats) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: kind.radius(),
            speed: stats.speed * kind.speed_multiplier(),
            hp: stats.hp,
            max_hp: stats.hp,
            mass: kind.mass(),
            knockback: Vec2::ZERO,
            // Ranged variants wait one full interval before their first shot
            shoot_timer: kind.shoot_interval().unwrap_or(0.0),
            dash_cooldown: 0.0,
            dash_timer: 0.0,
            alive: true,
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    /// Advance AI and movement by `dt`
    pub fn update(&mut self, dt: f32, player_pos: Vec2, arena: &Arena) {
        if !self.alive {
            return;
        }

        self.shoot_timer = (self.shoot_timer - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.dash_timer = (self.dash_timer - dt).max(0.0);

        self.knockback *= KNOCKBACK_RETAIN_PER_SECOND.powf(dt);
        if self.knockback.length_squared() < 1e-4 {
            self.knockback = Vec2::ZERO;
        }

        let dist = self.pos.distance(player_pos);
        let mut dir = if dist > HOMING_DEADZONE {
            direction_to(self.pos, player_pos)
        } else {
            Vec2::ZERO
        };
        let mut speed = self.speed;

        match self.kind {
            EnemyKind::Melee | EnemyKind::Tank => {}
            EnemyKind::Shooter => {
                if dist < SHOOTER_RETREAT_DISTANCE {
                    dir = -dir;
                }
            }
            EnemyKind::Charger => {
                if !self.is_dashing()
                    && self.dash_cooldown <= 0.0
                    && dist <= CHARGER_ACTIVATION_RADIUS
                {
                    self.dash_timer = CHARGER_DASH_DURATION;
                    self.dash_cooldown = CHARGER_DASH_COOLDOWN;
                }
                if self.is_dashing() {
                    speed *= CHARGER_DASH_MULTIPLIER;
                }
            }
        }

        let velocity = dir * speed + self.knockback;
        self.pos = move_with_walls(self.pos, velocity * dt, self.radius, &arena.walls);
        self.pos = arena.clamp_inside(self.pos, self.radius);
    }

    /// Fire at `target` if this variant shoots and its timer has elapsed
    pub fn try_shoot(&mut self, target: Vec2, tuning: &Tuning) -> Option<Projectile> {
        let interval = self.kind.shoot_interval()?;
        if !self.alive || self.shoot_timer > 0.0 {
            return None;
        }
        let dir = direction_to(self.pos, target);
        if dir == Vec2::ZERO {
            return None;
        }

        self.shoot_timer = interval;
        Some(Projectile::new(
            self.pos,
            dir * tuning.enemy_bullet_speed,
            tuning.enemy_bullet_radius,
            tuning.enemy_bullet_damage,
            tuning.enemy_bullet_knockback,
            Side::Enemy,
        ))
    }

    /// Impulse away from `source`, scaled down by mass
    pub fn apply_knockback(&mut self, source: Vec2, force: f32) {
        let dir = direction_to(source, self.pos);
        self.knockback += dir * (force / self.mass);
    }

    /// Apply damage; returns true only on the hit that kills
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hp: i32, speed: f32) -> EnemyStats {
        EnemyStats { hp, speed }
    }

    fn open_arena() -> Arena {
        Arena::bordered(2000.0, 2000.0)
    }

    #[test]
    fn test_variant_table() {
        for kind in EnemyKind::ALL {
            assert!(kind.radius() > 0.0);
            assert!(kind.mass() > 0.0);
        }
        assert_eq!(EnemyKind::Tank.radius(), 24.0);
        assert_eq!(EnemyKind::Melee.shoot_interval(), None);
        assert_eq!(EnemyKind::Shooter.shoot_interval(), Some(1.2));
    }

    #[test]
    fn test_tank_is_slower() {
        let tank = Enemy::new(1, EnemyKind::Tank, Vec2::ZERO, stats(100, 100.0));
        assert!((tank.speed - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_melee_homes() {
        let arena = open_arena();
        let mut e = Enemy::new(1, EnemyKind::Melee, Vec2::new(500.0, 500.0), stats(25, 100.0));
        e.update(0.1, Vec2::new(800.0, 500.0), &arena);
        assert!((e.pos.x - 510.0).abs() < 1e-3);
        assert!((e.pos.y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_shooter_retreats_when_close() {
        let arena = open_arena();
        let mut e = Enemy::new(1, EnemyKind::Shooter, Vec2::new(500.0, 500.0), stats(25, 100.0));
        e.update(0.1, Vec2::new(550.0, 500.0), &arena);
        assert!(e.pos.x < 500.0);

        let mut far = Enemy::new(2, EnemyKind::Shooter, Vec2::new(500.0, 500.0), stats(25, 100.0));
        far.update(0.1, Vec2::new(900.0, 500.0), &arena);
        assert!(far.pos.x > 500.0);
    }

    #[test]
    fn test_charger_dash_cycle() {
        let arena = open_arena();
        let mut e = Enemy::new(1, EnemyKind::Charger, Vec2::new(500.0, 500.0), stats(25, 100.0));
        // Out of range: no dash
        e.update(0.1, Vec2::new(1500.0, 500.0), &arena);
        assert!(!e.is_dashing());

        // In range: dash at triple speed
        let start = e.pos;
        e.update(0.1, Vec2::new(start.x + 300.0, 500.0), &arena);
        assert!(e.is_dashing());
        assert!((e.pos.x - start.x - 30.0).abs() < 1e-3);

        // Dash ends, cooldown keeps it from restarting
        for _ in 0..5 {
            e.update(0.1, Vec2::new(e.pos.x + 300.0, 500.0), &arena);
        }
        assert!(!e.is_dashing());
        assert!(e.dash_cooldown > 0.0);
    }

    #[test]
    fn test_try_shoot_respects_interval() {
        let tuning = Tuning::default();
        let mut e = Enemy::new(1, EnemyKind::Shooter, Vec2::ZERO, stats(25, 0.0));
        assert!(e.try_shoot(Vec2::new(100.0, 0.0), &tuning).is_none());

        e.shoot_timer = 0.0;
        let shot = e.try_shoot(Vec2::new(100.0, 0.0), &tuning).unwrap();
        assert_eq!(shot.owner, Side::Enemy);
        assert_eq!(shot.vel, Vec2::new(tuning.enemy_bullet_speed, 0.0));
        assert!(e.try_shoot(Vec2::new(100.0, 0.0), &tuning).is_none());

        let mut melee = Enemy::new(2, EnemyKind::Melee, Vec2::ZERO, stats(25, 0.0));
        assert!(melee.try_shoot(Vec2::new(100.0, 0.0), &tuning).is_none());
    }

    #[test]
    fn test_knockback_scales_with_mass_and_decays() {
        let arena = open_arena();
        let mut light = Enemy::new(1, EnemyKind::Melee, Vec2::new(500.0, 500.0), stats(25, 0.0));
        let mut heavy = Enemy::new(2, EnemyKind::Tank, Vec2::new(500.0, 500.0), stats(25, 0.0));
        light.apply_knockback(Vec2::new(400.0, 500.0), 160.0);
        heavy.apply_knockback(Vec2::new(400.0, 500.0), 160.0);
        assert!((light.knockback.x - 100.0).abs() < 1e-3);
        assert_eq!(light.knockback.y, 0.0);
        assert!(heavy.knockback.x < light.knockback.x);

        light.update(1.0, Vec2::new(500.0, 500.0), &arena);
        assert!((light.knockback.x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut e = Enemy::new(1, EnemyKind::Melee, Vec2::ZERO, stats(20, 0.0));
        assert!(!e.take_damage(15));
        assert_eq!(e.hp, 5);
        assert!(e.take_damage(15));
        assert!(!e.alive);
        assert!(!e.take_damage(15));
    }

    #[test]
    fn test_stays_in_arena() {
        let arena = Arena::bordered(400.0, 400.0);
        let mut e = Enemy::new(1, EnemyKind::Melee, Vec2::new(20.0, 200.0), stats(25, 0.0));
        e.apply_knockback(Vec2::new(200.0, 200.0), 1.0e5);
        e.update(0.1, Vec2::new(200.0, 200.0), &arena);
        assert!(e.pos.x >= e.radius);
    }
}
