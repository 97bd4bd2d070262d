//! Game balance tuning
//!
//! Every number that shapes a fight but is not part of a level descriptor.
//! Hosts may override any subset from JSON; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Balance table consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_radius: f32,
    /// Movement speed (units/s)
    pub player_speed: f32,
    pub player_hp: i32,
    pub player_mass: f32,
    /// Seconds between player shots
    pub player_shoot_cooldown: f32,

    // === Player bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_knockback: f32,

    // === Enemy bullets ===
    pub enemy_bullet_radius: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_damage: i32,
    pub enemy_bullet_knockback: f32,

    // === Contact ===
    /// Damage the player takes per contact event
    pub contact_damage: i32,
    /// Damage the touched enemy takes per contact event
    pub player_contact_damage: i32,
    /// Shared cooldown between contact events (seconds)
    pub contact_damage_interval: f32,

    // === Pacing ===
    /// Pre-roll before the first wave may spawn
    pub intro_seconds: f32,
    /// Delay before the first wave once the intro ends
    pub first_wave_delay: f32,
    /// Enemies in wave 0; each later wave adds two
    pub wave_base_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 18.0,
            player_speed: 280.0,
            player_hp: 100,
            player_mass: 1.0,
            player_shoot_cooldown: 0.2,

            bullet_radius: 5.0,
            bullet_speed: 650.0,
            bullet_damage: 15,
            bullet_knockback: 380.0,

            enemy_bullet_radius: 4.0,
            enemy_bullet_speed: 280.0,
            enemy_bullet_damage: 5,
            enemy_bullet_knockback: 60.0,

            contact_damage: 10,
            player_contact_damage: 8,
            contact_damage_interval: 0.5,

            intro_seconds: 0.8,
            first_wave_delay: 0.25,
            wave_base_count: 4,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(e) = tuning.validate() {
            log::warn!("Rejected tuning override: {e}");
            return Err(e);
        }
        Ok(tuning)
    }

    /// Reject values that would break entity invariants
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("player_radius", self.player_radius),
            ("player_mass", self.player_mass),
            ("bullet_radius", self.bullet_radius),
            ("bullet_speed", self.bullet_speed),
            ("enemy_bullet_radius", self.enemy_bullet_radius),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("player_shoot_cooldown", self.player_shoot_cooldown),
            ("bullet_knockback", self.bullet_knockback),
            ("enemy_bullet_knockback", self.enemy_bullet_knockback),
            ("contact_damage_interval", self.contact_damage_interval),
            ("intro_seconds", self.intro_seconds),
            ("first_wave_delay", self.first_wave_delay),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.player_hp <= 0 {
            return Err(ConfigError::InvalidTuning(format!(
                "player_hp must be positive, got {}",
                self.player_hp
            )));
        }
        Ok(())
    }
}
