//! Score and run statistics
//!
//! The simulation only accumulates numbers here; persisting a best score is
//! the host's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::enemy::EnemyKind;

/// Flat bonus for clearing any wave
pub const WAVE_CLEAR_BASE: u64 = 150;
/// Extra bonus per wave number
pub const WAVE_CLEAR_PER_WAVE: u64 = 25;

/// Bonus for clearing wave number `wave_number` (1-based)
pub fn wave_clear_bonus(wave_number: u32) -> u64 {
    WAVE_CLEAR_BASE + WAVE_CLEAR_PER_WAVE * wave_number as u64
}

/// Running score for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub score: u64,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// Add the variant's kill value; returns the points awarded
    pub fn add_kill(&mut self, kind: EnemyKind) -> u64 {
        let points = kind.kill_score();
        self.score += points;
        log::debug!("Kill {:?} +{} (score {})", kind, points, self.score);
        points
    }

    /// Add the wave-clear bonus; returns the points awarded
    pub fn add_wave_complete(&mut self, wave_number: u32) -> u64 {
        let points = wave_clear_bonus(wave_number);
        self.score += points;
        log::debug!("Wave {} cleared +{} (score {})", wave_number, points, self.score);
        points
    }
}

/// Counters accumulated over a run (and across a campaign)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub time_seconds: f32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub kills_total: u32,
    pub kills_by_type: BTreeMap<EnemyKind, u32>,
}

impl RunStats {
    pub fn record_kill(&mut self, kind: EnemyKind) {
        self.kills_total += 1;
        *self.kills_by_type.entry(kind).or_insert(0) += 1;
    }

    /// Fraction of shots that hit something (0 when nothing was fired)
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        }
    }
}

/// Final report attached to win/loss events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub time_seconds: f32,
    pub waves_spawned: u32,
    pub waves_total: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub kills_total: u32,
    pub kills_by_type: BTreeMap<EnemyKind, u32>,
    pub hp_start: i32,
    pub hp_end: i32,
    pub score: u64,
    pub campaign_mode: bool,
}
