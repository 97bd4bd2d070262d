//! Wave director and enemy spawn placement
//!
//! The director is a small state machine:
//! `Waiting -> InProgress -> (cleared) -> Waiting -> ... -> Finished`.
//! It only decides *when* a wave spawns and how big it is; [`spawn_wave`]
//! turns that order into enemies placed around the arena.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, ArenaLayout, RingBand, sample_range};
use super::enemy::{Enemy, EnemyKind};
use super::events::GameEvent;
use crate::consts::TILE_SIZE;
use crate::level::LevelDescriptor;
use crate::tuning::Tuning;

/// Extra enemies per wave index
pub const WAVE_GROWTH: u32 = 2;

/// Spawns keep at least this many tiles from the player
pub const MIN_SPAWN_DISTANCE_TILES: f32 = 3.0;
/// Relaxed distance used when re-picking a spot that overlapped a wall
pub const REPICK_DISTANCE_TILES: f32 = 2.0;

pub const MAZE_SPAWN_ATTEMPTS: usize = 300;
pub const RING_SPAWN_ATTEMPTS: usize = 400;
pub const WALL_REPICK_ATTEMPTS: usize = 80;

/// Ring spawns stay this many tiles inside the band
pub const RING_SPAWN_MARGIN_TILES: f32 = 0.8;
/// Clearance probe used when testing ring spawn points against walls
pub const RING_PROBE_RADIUS: f32 = 20.0;
/// Open-arena spawns stay this many tiles from the edges
pub const OPEN_SPAWN_MARGIN_TILES: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Counting down to the next spawn
    Waiting { timer: f32 },
    /// A wave is alive on the field
    InProgress,
    /// Every wave spawned and the last one is cleared
    Finished,
}

/// Request to spawn one wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveOrder {
    /// 0-based
    pub wave_index: u32,
    pub count: u32,
}

/// Outcome of one director update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveUpdate {
    /// Index of a wave that was just found cleared
    pub cleared: Option<u32>,
    pub spawn: Option<WaveOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Waves spawned so far
    wave_index: u32,
    total_waves: u32,
    spawn_interval: f32,
    base_count: u32,
    phase: WavePhase,
}

impl WaveDirector {
    pub fn new(total_waves: u32, spawn_interval: f32, first_delay: f32, base_count: u32) -> Self {
        Self {
            wave_index: 0,
            total_waves,
            spawn_interval,
            base_count,
            phase: WavePhase::Waiting { timer: first_delay },
        }
    }

    pub fn for_level(level: &LevelDescriptor, tuning: &Tuning) -> Self {
        Self::new(
            level.waves,
            level.spawn_interval_seconds,
            tuning.first_wave_delay,
            tuning.wave_base_count,
        )
    }

    /// Number of waves spawned so far
    pub fn wave_index(&self) -> u32 {
        self.wave_index
    }

    pub fn total_waves(&self) -> u32 {
        self.total_waves
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == WavePhase::Finished
    }

    /// Enemies in the wave with the given 0-based index
    pub fn enemy_count(&self, wave_index: u32) -> u32 {
        self.base_count + WAVE_GROWTH * wave_index
    }

    /// Advance by `dt` given how many enemies are still alive
    ///
    /// Nothing moves while enemies are alive. Once the field is empty a wave
    /// in progress is reported cleared and the countdown to the next one
    /// starts; the countdown only runs on an empty field.
    pub fn update(&mut self, dt: f32, live_enemies: usize) -> WaveUpdate {
        let mut out = WaveUpdate::default();
        if live_enemies > 0 {
            return out;
        }

        if self.phase == WavePhase::InProgress {
            out.cleared = Some(self.wave_index - 1);
            if self.wave_index >= self.total_waves {
                self.phase = WavePhase::Finished;
                return out;
            }
            self.phase = WavePhase::Waiting {
                timer: self.spawn_interval,
            };
        }

        if let WavePhase::Waiting { timer } = &mut self.phase {
            *timer -= dt;
            if *timer <= 0.0 && self.wave_index < self.total_waves {
                let order = WaveOrder {
                    wave_index: self.wave_index,
                    count: self.enemy_count(self.wave_index),
                };
                self.wave_index += 1;
                self.phase = WavePhase::InProgress;
                out.spawn = Some(order);
            }
        }

        out
    }

    /// Close out the final wave as soon as it is cleared
    ///
    /// Called after combat so the last wave's clear is reported on the same
    /// tick the level is won. Returns the cleared wave index.
    pub fn finish_if_cleared(&mut self, live_enemies: usize) -> Option<u32> {
        if self.phase == WavePhase::InProgress
            && live_enemies == 0
            && self.wave_index >= self.total_waves
        {
            self.phase = WavePhase::Finished;
            return Some(self.wave_index - 1);
        }
        None
    }
}

/// Where a spawn ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlacement {
    pub pos: Vec2,
    /// Re-picks ran out and the spot still overlaps a wall
    pub overlaps_wall: bool,
}

/// Candidate spawn point for the arena's layout
pub fn pick_spawn_point<R: Rng>(arena: &Arena, player_pos: Vec2, min_dist: f32, rng: &mut R) -> Vec2 {
    match &arena.layout {
        ArenaLayout::Maze { floor_tiles } => pick_in_maze(arena, floor_tiles, player_pos, min_dist, rng),
        ArenaLayout::Ring(band) => pick_in_ring(arena, band, player_pos, min_dist, rng),
        ArenaLayout::Open => pick_in_open(arena, rng),
    }
}

fn pick_in_maze<R: Rng>(
    arena: &Arena,
    floor_tiles: &[Vec2],
    player_pos: Vec2,
    min_dist: f32,
    rng: &mut R,
) -> Vec2 {
    let min_sq = min_dist * min_dist;
    for _ in 0..MAZE_SPAWN_ATTEMPTS {
        let Some(&tile) = floor_tiles.choose(rng) else {
            break;
        };
        if tile.distance_squared(player_pos) >= min_sq {
            return tile;
        }
    }
    floor_tiles.choose(rng).copied().unwrap_or_else(|| arena.center())
}

fn pick_in_ring<R: Rng>(
    arena: &Arena,
    band: &RingBand,
    player_pos: Vec2,
    min_dist: f32,
    rng: &mut R,
) -> Vec2 {
    let Some((min, max)) = band.interior(TILE_SIZE * RING_SPAWN_MARGIN_TILES) else {
        return band.center;
    };
    let min_sq = min_dist * min_dist;
    for _ in 0..RING_SPAWN_ATTEMPTS {
        let p = Vec2::new(sample_range(rng, min.x, max.x), sample_range(rng, min.y, max.y));
        if p.distance_squared(player_pos) < min_sq {
            continue;
        }
        if arena.overlaps_wall(p, RING_PROBE_RADIUS) {
            continue;
        }
        return p;
    }
    band.center
}

fn pick_in_open<R: Rng>(arena: &Arena, rng: &mut R) -> Vec2 {
    let margin = TILE_SIZE * OPEN_SPAWN_MARGIN_TILES;
    Vec2::new(
        sample_range(rng, margin, arena.width - margin),
        sample_range(rng, margin, arena.height - margin),
    )
}

/// Pick a spawn point, re-picking a bounded number of times if it overlaps a wall
pub fn place_enemy<R: Rng>(arena: &Arena, player_pos: Vec2, radius: f32, rng: &mut R) -> SpawnPlacement {
    let mut pos = pick_spawn_point(arena, player_pos, TILE_SIZE * MIN_SPAWN_DISTANCE_TILES, rng);
    if !arena.overlaps_wall(pos, radius) {
        return SpawnPlacement { pos, overlaps_wall: false };
    }

    for _ in 0..WALL_REPICK_ATTEMPTS {
        pos = pick_spawn_point(arena, player_pos, TILE_SIZE * REPICK_DISTANCE_TILES, rng);
        if !arena.overlaps_wall(pos, radius) {
            return SpawnPlacement { pos, overlaps_wall: false };
        }
    }
    SpawnPlacement { pos, overlaps_wall: true }
}

/// Build the enemies for one wave
///
/// Ids are drawn from `next_id`. Placements that exhausted their re-picks are
/// reported through `events` as [`GameEvent::SpawnFallback`].
pub fn spawn_wave<R: Rng>(
    order: &WaveOrder,
    level: &LevelDescriptor,
    arena: &Arena,
    player_pos: Vec2,
    rng: &mut R,
    next_id: &mut u32,
    events: &mut Vec<GameEvent>,
) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(order.count as usize);
    for _ in 0..order.count {
        let kind = level.enemy_types.choose(rng).copied().unwrap_or(EnemyKind::Melee);
        let placement = place_enemy(arena, player_pos, kind.radius(), rng);
        if placement.overlaps_wall {
            log::warn!(
                "No clear spawn for {:?} after {} re-picks, placing at {:?}",
                kind,
                WALL_REPICK_ATTEMPTS,
                placement.pos
            );
            events.push(GameEvent::SpawnFallback {
                variant: kind,
                position: placement.pos,
            });
        }

        let id = *next_id;
        *next_id += 1;
        let pos = arena.clamp_inside(placement.pos, kind.radius());
        enemies.push(Enemy::new(id, kind, pos, level.stats_for(kind)));
    }
    enemies
}
