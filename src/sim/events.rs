//! Events emitted by the tick
//!
//! The host reacts to these (sound, UI, persistence); the simulation never
//! calls back into the host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::projectile::Side;
use crate::score::RunResults;

/// What a projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitTarget {
    Player,
    Enemy { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ShotFired {
        by: Side,
    },
    ProjectileHit {
        target: HitTarget,
        damage: i32,
    },
    /// Player and enemy traded contact damage
    ContactDamage {
        enemy_id: u32,
        to_player: i32,
        to_enemy: i32,
    },
    EnemyKilled {
        id: u32,
        variant: EnemyKind,
        points: u64,
    },
    WaveSpawned {
        wave_index: u32,
        count: u32,
    },
    WaveCleared {
        wave_index: u32,
        bonus: u64,
    },
    /// A spawn ran out of retries and was placed overlapping a wall
    SpawnFallback {
        variant: EnemyKind,
        position: Vec2,
    },
    LevelAdvanced {
        level_index: usize,
        name: String,
    },
    LevelWon {
        results: RunResults,
    },
    LevelLost {
        results: RunResults,
    },
}

impl GameEvent {
    /// Whether the event ends the run
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::LevelWon { .. } | GameEvent::LevelLost { .. })
    }
}
