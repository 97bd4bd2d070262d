//! Level descriptors and campaign ordering
//!
//! Descriptors are parsed once from JSON and validated before any simulation
//! state is built; a run never starts from an invalid level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::sim::enemy::EnemyKind;

/// Smallest arena (in tiles) that leaves room for spawn margins
pub const MIN_ARENA_TILES: u32 = 6;

/// How a level is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Every wave has spawned and no enemy is left alive
    KillAllAfterWaves,
}

impl WinCondition {
    pub fn is_met(&self, waves_spawned: u32, waves_total: u32, live_enemies: usize) -> bool {
        match self {
            WinCondition::KillAllAfterWaves => waves_spawned >= waves_total && live_enemies == 0,
        }
    }
}

/// Per-variant base stats from a level's stat table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub hp: i32,
    pub speed: f32,
}

impl Default for EnemyStats {
    /// Stats used for variants a level does not list
    fn default() -> Self {
        Self {
            hp: 25,
            speed: 120.0,
        }
    }
}

fn default_waves() -> u32 {
    3
}

fn default_spawn_interval() -> f32 {
    3.0
}

fn default_enemy_types() -> Vec<EnemyKind> {
    vec![EnemyKind::Melee]
}

/// One level of the campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    pub name: String,
    /// Arena width in tiles
    pub arena_width: u32,
    /// Arena height in tiles
    pub arena_height: u32,
    #[serde(default = "default_waves")]
    pub waves: u32,
    /// Delay after a wave is cleared before the next one spawns
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval_seconds: f32,
    #[serde(default = "default_enemy_types")]
    pub enemy_types: Vec<EnemyKind>,
    #[serde(default)]
    pub enemy_stats: BTreeMap<EnemyKind, EnemyStats>,
    pub win_condition: WinCondition,
}

impl LevelDescriptor {
    /// Parse and validate a single level
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let level: LevelDescriptor = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Stats for a variant, falling back to the fixed defaults when unlisted
    pub fn stats_for(&self, kind: EnemyKind) -> EnemyStats {
        self.enemy_stats.get(&kind).copied().unwrap_or_default()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let fail = |reason: String| ConfigError::InvalidLevel {
            level: self.name.clone(),
            reason,
        };

        if self.arena_width < MIN_ARENA_TILES || self.arena_height < MIN_ARENA_TILES {
            return Err(fail(format!(
                "arena must be at least {MIN_ARENA_TILES}x{MIN_ARENA_TILES} tiles, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.waves == 0 {
            return Err(fail("waves must be at least 1".to_string()));
        }
        if !(self.spawn_interval_seconds.is_finite() && self.spawn_interval_seconds >= 0.0) {
            return Err(fail(format!(
                "spawnIntervalSeconds must be non-negative, got {}",
                self.spawn_interval_seconds
            )));
        }
        if self.enemy_types.is_empty() {
            return Err(fail("enemyTypes must not be empty".to_string()));
        }
        for (kind, stats) in &self.enemy_stats {
            if stats.hp <= 0 {
                return Err(fail(format!("{kind:?} hp must be positive, got {}", stats.hp)));
            }
            if !(stats.speed.is_finite() && stats.speed >= 0.0) {
                return Err(fail(format!(
                    "{kind:?} speed must be non-negative, got {}",
                    stats.speed
                )));
            }
        }
        Ok(())
    }
}

/// Ordered list of levels; order defines campaign progression
///
/// Only constructed through [`Campaign::new`] / [`Campaign::from_json`], so
/// every contained level has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Campaign {
    levels: Vec<LevelDescriptor>,
}

impl Campaign {
    /// Build from already-parsed levels, validating each
    pub fn new(levels: Vec<LevelDescriptor>) -> ConfigResult<Self> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCampaign);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level descriptors
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Resolve a requested index, clamping anything out of range to the first level
    pub fn resolve_index(&self, requested: usize) -> usize {
        if requested < self.levels.len() {
            requested
        } else {
            log::warn!(
                "Level index {} out of range (campaign has {}), using level 0",
                requested,
                self.levels.len()
            );
            0
        }
    }

    /// Level at a resolved index
    pub fn level(&self, index: usize) -> &LevelDescriptor {
        &self.levels[self.resolve_index(index)]
    }
}
