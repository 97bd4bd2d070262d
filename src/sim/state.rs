//! Game state and level loading
//!
//! Everything the tick mutates lives here. The random generator is owned by
//! the state so a seed plus an input sequence fully determines a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, LayoutKind};
use super::enemy::{Enemy, EnemyKind};
use super::events::GameEvent;
use super::player::Player;
use super::projectile::Projectile;
use super::tick::{TickInput, tick};
use super::wave::{WaveDirector, WaveOrder, spawn_wave};
use crate::error::ConfigResult;
use crate::level::{Campaign, LevelDescriptor};
use crate::score::{RunResults, RunStats, ScoreKeeper};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (including the intro pre-roll)
    Playing,
    /// Final level won; further ticks do nothing
    Won,
    /// Player died; further ticks do nothing
    Lost,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    campaign: Campaign,
    /// Index of the level being played
    pub level_index: usize,
    /// Advance to the next level on a win instead of ending the run
    pub campaign_mode: bool,
    pub tuning: Tuning,
    pub arena: Arena,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub director: WaveDirector,
    /// Shared cooldown between contact damage events
    pub contact_timer: f32,
    /// Wave spawning waits until this reaches zero
    pub intro_timer: f32,
    pub phase: GamePhase,
    pub score: ScoreKeeper,
    pub stats: RunStats,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: R,
    next_id: u32,
}

impl GameState<Pcg32> {
    /// Deterministic run from a seed
    pub fn seeded(
        campaign: Campaign,
        level_index: usize,
        campaign_mode: bool,
        tuning: Tuning,
        seed: u64,
    ) -> ConfigResult<Self> {
        Self::new(campaign, level_index, campaign_mode, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Start a run at `level_index` (clamped to the first level when out of range)
    pub fn new(
        campaign: Campaign,
        level_index: usize,
        campaign_mode: bool,
        tuning: Tuning,
        mut rng: R,
    ) -> ConfigResult<Self> {
        tuning.validate()?;
        let level_index = campaign.resolve_index(level_index);
        let arena = Arena::build(campaign.level(level_index), &mut rng);
        Ok(Self::assemble(campaign, level_index, campaign_mode, tuning, arena, rng))
    }

    /// Single-level run on a caller-built arena
    pub fn with_arena(level: LevelDescriptor, arena: Arena, tuning: Tuning, rng: R) -> ConfigResult<Self> {
        tuning.validate()?;
        let campaign = Campaign::new(vec![level])?;
        Ok(Self::assemble(campaign, 0, false, tuning, arena, rng))
    }

    fn assemble(
        campaign: Campaign,
        level_index: usize,
        campaign_mode: bool,
        tuning: Tuning,
        arena: Arena,
        rng: R,
    ) -> Self {
        let player = Player::new(Vec2::ZERO, &tuning);
        let director = WaveDirector::for_level(campaign.level(level_index), &tuning);
        let mut state = Self {
            campaign,
            level_index,
            campaign_mode,
            tuning,
            arena,
            player,
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            director,
            contact_timer: 0.0,
            intro_timer: 0.0,
            phase: GamePhase::Playing,
            score: ScoreKeeper::new(),
            stats: RunStats::default(),
            time_ticks: 0,
            rng,
            next_id: 1,
        };
        state.reset_level();
        state
    }

    /// Advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        tick(self, input, dt)
    }

    /// Descriptor of the level being played
    pub fn level(&self) -> &LevelDescriptor {
        self.campaign.level(self.level_index)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an enemy with the current level's stats for its variant
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let stats = self.level().stats_for(kind);
        self.enemies.push(Enemy::new(id, kind, pos, stats));
        id
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Generate and append one wave; returns how many enemies were added
    pub(super) fn spawn_wave(&mut self, order: &WaveOrder, events: &mut Vec<GameEvent>) -> u32 {
        let level = self.campaign.level(self.level_index);
        let spawned = spawn_wave(
            order,
            level,
            &self.arena,
            self.player.pos,
            &mut self.rng,
            &mut self.next_id,
            events,
        );
        let count = spawned.len() as u32;
        self.enemies.extend(spawned);
        count
    }

    /// Switch to another level of the campaign
    ///
    /// Builds a fresh arena and clears every entity; player hp, score and run
    /// statistics carry over.
    pub fn load_level(&mut self, index: usize) {
        self.level_index = self.campaign.resolve_index(index);
        self.arena = Arena::build(self.campaign.level(self.level_index), &mut self.rng);
        self.reset_level();
    }

    fn reset_level(&mut self) {
        let level = self.campaign.level(self.level_index);
        log::info!(
            "Loaded level {} '{}' ({:?}, {} waves)",
            self.level_index,
            level.name,
            LayoutKind::from_level_name(&level.name),
            level.waves
        );

        self.director = WaveDirector::for_level(level, &self.tuning);
        self.enemies.clear();
        self.player_projectiles.clear();
        self.enemy_projectiles.clear();
        self.contact_timer = 0.0;
        self.intro_timer = self.tuning.intro_seconds;
        self.player.pos = self.arena.player_start(self.player.radius);
        self.player.shoot_timer = 0.0;
        self.phase = GamePhase::Playing;
    }

    /// Whether a next campaign level exists to advance into
    pub fn has_next_level(&self) -> bool {
        self.campaign_mode && self.level_index + 1 < self.campaign.len()
    }

    /// Aggregated statistics for the run so far
    pub fn results(&self) -> RunResults {
        RunResults {
            time_seconds: self.stats.time_seconds,
            waves_spawned: self.director.wave_index(),
            waves_total: self.director.total_waves(),
            shots_fired: self.stats.shots_fired,
            shots_hit: self.stats.shots_hit,
            kills_total: self.stats.kills_total,
            kills_by_type: self.stats.kills_by_type.clone(),
            hp_start: self.player.hp_start,
            hp_end: self.player.hp,
            score: self.score.score,
            campaign_mode: self.campaign_mode,
        }
    }
}
